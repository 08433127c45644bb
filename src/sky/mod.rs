//! A live sky: placed objects, the current view, and what to draw
//!
//! [`SkySession`] owns the catalog store, the ephemeris provider and the
//! refresh scheduler. Observer updates place catalog objects once per
//! session and planets on the refresh cadence; every other call reads the
//! current snapshot.
//!
//! ## Frame Pipeline
//!
//! ```text
//! Direction --rotate(orientation)--> camera space --project--> ScreenPoint
//!           --buffered viewport test--> RenderItem
//! ```
//!
//! Each object class is held in an `Arc<[CelestialObject]>` and replaced
//! wholesale, so a frame in progress never sees a half-updated list.

pub mod markers;

pub use markers::{cardinal_markers, horizon_polylines, CardinalMarker};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalogs::CatalogStore;
use crate::celestial::{CelestialObject, ObjectFilter, ObjectKind, Rgba};
use crate::config::SkyConfig;
use crate::coordinates::angle::cardinal_direction_name;
use crate::observer::Observer;
use crate::orientation::{rotate, OrientationController, OrientationState};
use crate::planetlib::{position_planets, EphemerisProvider};
use crate::projection::{nearest, project, FieldOfView, Positioned, ScreenPoint, Viewport};
use crate::scheduler::{RefreshPlan, RefreshScheduler};
use crate::Result;

/// Planets are drawn this many times larger than their base size
pub const PLANET_SIZE_FACTOR: f64 = 7.0;
/// Deep-sky objects are drawn this many times larger than their base size
pub const NEBULA_SIZE_FACTOR: f64 = 10.0;

/// How much glow a star gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GlowDetail {
    /// Plain disc
    None,
    /// Single glow layer with a core
    Simple,
    /// Layered glow with a core
    Detailed,
}

/// One object to draw this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    pub id: String,
    pub name: String,
    pub kind: ObjectKind,
    pub point: ScreenPoint,
    /// Drawn size in pixels after depth and zoom scaling
    pub render_size: f64,
    pub color: Rgba,
    /// Star brightness; 1 for planets and deep-sky objects
    pub opacity: f64,
    /// Whether the star is bright enough to glow
    pub glow: bool,
    pub glow_detail: GlowDetail,
}

/// The object under a tap, with its detail rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub object: CelestialObject,
    pub type_name: &'static str,
    pub details: BTreeMap<String, String>,
}

/// Observer-driven sky state and the current view
pub struct SkySession {
    config: SkyConfig,
    catalogs: CatalogStore,
    provider: Option<Arc<dyn EphemerisProvider>>,
    scheduler: RefreshScheduler,
    inline_planet_refresh: bool,
    observer: Option<Observer>,
    stars: Arc<[CelestialObject]>,
    planets: Arc<[CelestialObject]>,
    nebulae: Arc<[CelestialObject]>,
    filter: ObjectFilter,
    orientation: OrientationController,
    fov: FieldOfView,
}

impl SkySession {
    /// Create a session; nothing is placed until the first observer update
    pub fn new(
        config: SkyConfig,
        catalogs: CatalogStore,
        provider: Option<Arc<dyn EphemerisProvider>>,
    ) -> Self {
        let scheduler = RefreshScheduler::new(config.planet_refresh_secs);
        let orientation = OrientationController::new(config.drag_sensitivity);
        let fov = FieldOfView::new(config.default_fov_deg, config.min_fov_deg, config.max_fov_deg);

        Self {
            config,
            catalogs,
            provider,
            scheduler,
            inline_planet_refresh: true,
            observer: None,
            stars: Arc::from(Vec::new()),
            planets: Arc::from(Vec::new()),
            nebulae: Arc::from(Vec::new()),
            filter: ObjectFilter::default(),
            orientation,
            fov,
        }
    }

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    pub fn catalogs(&self) -> &CatalogStore {
        &self.catalogs
    }

    /// Ephemeris provider, for hosts that refresh planets on their own thread
    pub fn provider(&self) -> Option<Arc<dyn EphemerisProvider>> {
        self.provider.clone()
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    /// Whether [`update_observer`](Self::update_observer) queries the provider itself
    pub fn inline_planet_refresh(&self) -> bool {
        self.inline_planet_refresh
    }

    /// Turn the ephemeris query inside `update_observer` on or off
    ///
    /// With it off, a due refresh is only reported. The host computes the
    /// batch with [`position_planets`] and hands it to
    /// [`publish_planets`](Self::publish_planets).
    pub fn set_inline_planet_refresh(&mut self, enabled: bool) {
        self.inline_planet_refresh = enabled;
    }

    /// Latest valid observer, if any
    pub fn observer(&self) -> Option<&Observer> {
        self.observer.as_ref()
    }

    pub fn stars(&self) -> Arc<[CelestialObject]> {
        self.stars.clone()
    }

    pub fn planets(&self) -> Arc<[CelestialObject]> {
        self.planets.clone()
    }

    pub fn nebulae(&self) -> Arc<[CelestialObject]> {
        self.nebulae.clone()
    }

    /// Take a new location fix or clock tick
    ///
    /// Returns the work that was carried out. Stars and deep-sky objects are
    /// placed on the first update of a session; planets whenever the refresh
    /// interval has passed and a provider is available. A star catalog that
    /// cannot be loaded is an error and the next update tries again.
    ///
    /// The provider is queried on the calling thread. Hosts that refresh
    /// planets elsewhere turn this off with
    /// [`set_inline_planet_refresh`](Self::set_inline_planet_refresh); the
    /// returned `refresh_planets` then means a batch is due and stays set
    /// until one is published.
    pub fn update_observer(&mut self, observer: Observer) -> Result<RefreshPlan> {
        if !observer.is_valid() {
            warn!(
                "Ignoring invalid observer Lat={} Lon={}",
                observer.latitude, observer.longitude
            );
            return Ok(RefreshPlan::default());
        }
        self.observer = Some(observer);

        let now = observer.timestamp;
        let plan = self.scheduler.plan(now);

        if plan.load_catalogs {
            self.place_catalogs(&observer)?;
        }

        if !self.inline_planet_refresh {
            if plan.refresh_planets {
                debug!("Planet refresh due; waiting for the host to publish");
            }
            return Ok(plan);
        }

        let refresh_planets = plan.refresh_planets && self.provider.is_some();
        if refresh_planets {
            if let Some(provider) = &self.provider {
                let planets = position_planets(provider.as_ref(), &observer);
                self.publish_planets(planets, now);
            }
        } else if plan.refresh_planets {
            debug!("Planet refresh due but no ephemeris provider is configured");
        }

        Ok(RefreshPlan {
            load_catalogs: plan.load_catalogs,
            refresh_planets,
        })
    }

    fn place_catalogs(&mut self, observer: &Observer) -> Result<()> {
        let stars = self.catalogs.position_stars(observer)?;
        let nebulae = self.catalogs.position_nebulae(observer);
        info!(
            "Placed {} stars and {} deep-sky objects",
            stars.len(),
            nebulae.len()
        );

        self.stars = stars.into();
        self.nebulae = nebulae.into();
        self.scheduler.mark_catalogs_loaded();
        Ok(())
    }

    /// Swap in a planet batch computed for the observer at `now`
    pub fn publish_planets(&mut self, planets: Vec<CelestialObject>, now: DateTime<Utc>) {
        debug!("Publishing {} planets", planets.len());
        self.planets = planets.into();
        self.scheduler.mark_planets_refreshed(now);
    }

    /// Start a new session; the next observer update places everything again
    pub fn reset(&mut self) {
        info!("Sky session reset");
        self.scheduler.reset();
    }

    pub fn filter(&self) -> ObjectFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ObjectFilter) {
        self.filter = filter;
    }

    pub fn orientation(&self) -> &OrientationController {
        &self.orientation
    }

    pub fn orientation_mut(&mut self) -> &mut OrientationController {
        &mut self.orientation
    }

    pub fn field_of_view(&self) -> &FieldOfView {
        &self.fov
    }

    pub fn field_of_view_mut(&mut self) -> &mut FieldOfView {
        &mut self.fov
    }

    /// Compass label for the last heading, e.g. `"NE"`
    pub fn compass_direction(&self) -> &'static str {
        cardinal_direction_name(self.orientation.compass_heading())
    }

    /// Objects passing the filter: stars, then planets, then deep-sky objects
    pub fn visible_objects(&self) -> impl Iterator<Item = &CelestialObject> + '_ {
        let filter = self.filter;
        self.stars
            .iter()
            .chain(self.planets.iter())
            .chain(self.nebulae.iter())
            .filter(move |object| filter.includes(object.kind()))
    }

    /// Objects to draw for the current orientation and zoom
    pub fn frame(&self, viewport: &Viewport) -> Vec<RenderItem> {
        let orientation = self.orientation.state();
        let fov = self.fov.degrees();
        let center = viewport.center();
        let scale = viewport.scale(fov);
        let zoom = self.config.default_fov_deg / fov;

        self.visible_objects()
            .filter_map(|object| {
                let rotated = rotate(object.direction(), &orientation);
                let point = project(&rotated, &center, scale)?;
                if !viewport.contains_with_buffer(&point, self.config.render_buffer_px) {
                    return None;
                }

                let base_size = object.size() * (1.0 / rotated.z) * 0.5 * zoom;
                Some(self.render_item(object, point, base_size))
            })
            .collect()
    }

    fn render_item(&self, object: &CelestialObject, point: ScreenPoint, base_size: f64) -> RenderItem {
        let (render_size, opacity, glow) = match object {
            CelestialObject::Star(star) => (
                base_size,
                star.brightness,
                star.size > self.config.glow_size_threshold,
            ),
            CelestialObject::Planet(_) => (base_size * PLANET_SIZE_FACTOR, 1.0, false),
            CelestialObject::Nebula(_) => (base_size * NEBULA_SIZE_FACTOR, 1.0, false),
        };

        let glow_detail = if glow && render_size >= self.config.detailed_star_size_px {
            GlowDetail::Detailed
        } else if glow && render_size >= self.config.simple_star_size_px {
            GlowDetail::Simple
        } else {
            GlowDetail::None
        };

        RenderItem {
            id: object.id().to_string(),
            name: object.name().to_string(),
            kind: object.kind(),
            point,
            render_size,
            color: object.color(),
            opacity,
            glow,
            glow_detail,
        }
    }

    /// The object nearest a tap, within the selection radius
    ///
    /// A selected planet has its distance queried from the provider; if that
    /// fails the distance row is simply left out.
    pub fn select_at(&self, tap: &ScreenPoint, viewport: &Viewport) -> Option<Selection> {
        let orientation = self.orientation.state();
        let scale = viewport.scale(self.fov.degrees());

        let hit = nearest(
            tap,
            self.visible_objects(),
            &orientation,
            &viewport.center(),
            scale,
            self.config.selection_radius_px,
        )?;

        let mut object = hit.clone();
        if let CelestialObject::Planet(planet) = &mut object {
            if let (Some(provider), Some(observer)) = (&self.provider, &self.observer) {
                match provider.distance_au(planet.body, observer.julian_day()) {
                    Ok(distance) => planet.distance_au = Some(distance),
                    Err(err) => debug!("No distance for {}: {}", planet.body, err),
                }
            }
        }

        debug!("Selected {} {}", object.type_name(), object.name());
        Some(Selection {
            type_name: object.type_name(),
            details: object.details(),
            object,
        })
    }

    /// Cardinal markers for the current view
    pub fn cardinal_markers(&self, viewport: &Viewport) -> Vec<CardinalMarker> {
        cardinal_markers(&self.orientation_state(), viewport, self.fov.degrees())
    }

    /// Horizon polylines for the current view
    pub fn horizon(&self, viewport: &Viewport) -> Vec<Vec<ScreenPoint>> {
        horizon_polylines(&self.orientation_state(), viewport, self.fov.degrees())
    }

    fn orientation_state(&self) -> OrientationState {
        self.orientation.state()
    }
}
