//! # Refresh Scheduling
//!
//! Decides, for each observer update, which object classes need to be
//! recomputed.
//!
//! - **Catalog objects** (stars, deep-sky) are placed once per session. A
//!   session starts with the first observer update and restarts after
//!   [`RefreshScheduler::reset`].
//! - **Planets** are refreshed on the first update of a session and then
//!   whenever at least the refresh interval has passed since the last
//!   *successful* refresh.
//!
//! The scheduler only answers questions. Callers report completed work with
//! [`RefreshScheduler::mark_catalogs_loaded`] and
//! [`RefreshScheduler::mark_planets_refreshed`], so a failed load is simply
//! planned again on the next update.

use chrono::{DateTime, Duration, Utc};

/// Work due for one observer update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshPlan {
    /// Stars and deep-sky objects must be (re)placed
    pub load_catalogs: bool,
    /// Planet positions must be re-queried
    pub refresh_planets: bool,
}

impl RefreshPlan {
    /// Whether anything is due
    pub fn is_idle(&self) -> bool {
        !self.load_catalogs && !self.refresh_planets
    }
}

/// Session and planet-refresh bookkeeping
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    planet_interval: Duration,
    catalogs_loaded: bool,
    last_planet_refresh: Option<DateTime<Utc>>,
}

/// `secs` as a [`Duration`], or `None` when it does not fit
pub fn interval_from_secs(secs: u64) -> Option<Duration> {
    i64::try_from(secs).ok().and_then(Duration::try_seconds)
}

impl RefreshScheduler {
    /// Create a scheduler refreshing planets every `planet_interval_secs`
    ///
    /// Intervals too long for a [`Duration`] saturate, so planets then
    /// refresh only once per session.
    pub fn new(planet_interval_secs: u64) -> Self {
        Self {
            planet_interval: interval_from_secs(planet_interval_secs).unwrap_or(Duration::MAX),
            catalogs_loaded: false,
            last_planet_refresh: None,
        }
    }

    /// Work due for an observer update at `now`
    pub fn plan(&self, now: DateTime<Utc>) -> RefreshPlan {
        let refresh_planets = match self.last_planet_refresh {
            Some(last) => now - last >= self.planet_interval,
            None => true,
        };

        RefreshPlan {
            load_catalogs: !self.catalogs_loaded,
            refresh_planets,
        }
    }

    /// Record that catalog objects were placed for this session
    pub fn mark_catalogs_loaded(&mut self) {
        self.catalogs_loaded = true;
    }

    /// Record a successful planet refresh at `now`
    pub fn mark_planets_refreshed(&mut self, now: DateTime<Utc>) {
        self.last_planet_refresh = Some(now);
    }

    /// Start a new session: catalogs reload and planets refresh on the next update
    pub fn reset(&mut self) {
        self.catalogs_loaded = false;
        self.last_planet_refresh = None;
    }

    pub fn catalogs_loaded(&self) -> bool {
        self.catalogs_loaded
    }

    pub fn last_planet_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_planet_refresh
    }
}
