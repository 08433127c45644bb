//! Star and deep-sky catalogs
//!
//! A [`CatalogStore`] is an explicitly owned handle over one
//! [`CatalogSource`]. Records are decoded on first use and kept for the life
//! of the store; placing them for an observer is a separate, repeatable step.
//!
//! The two catalogs fail differently. Without stars there is no sky, so a
//! missing or malformed star catalog is an error. The deep-sky catalog is
//! optional: problems are logged and an empty list is returned. A failed
//! deep-sky load is not cached and is retried on the next call.

pub mod nebulae;
pub mod stars;
pub mod synthetic;

pub use nebulae::NebulaRecord;
pub use stars::StarRecord;
pub use synthetic::generate_star_records;

use flate2::read::GzDecoder;
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::celestial::CelestialObject;
use crate::observer::Observer;
use crate::{Result, StarMapError};

/// File name of the star catalog inside a data directory
pub const STAR_CATALOG_FILE: &str = "stars_compact.json";
/// File name of the deep-sky catalog inside a data directory
pub const NEBULA_CATALOG_FILE: &str = "nebulae.json";

const BUNDLED_STARS: &str = include_str!("../../data/stars_compact.json");
const BUNDLED_NEBULAE: &str = include_str!("../../data/nebulae.json");

/// Where catalog records come from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// A directory holding `stars_compact.json` and `nebulae.json`, either of
    /// which may be gzipped (`.json.gz`)
    Directory(PathBuf),
    /// The small bright-star and Messier set compiled into the crate
    Bundled,
    /// Records supplied directly, e.g. by tests or a host that has its own storage
    Inline {
        stars: Vec<StarRecord>,
        nebulae: Vec<NebulaRecord>,
    },
    /// Random synthetic stars with specified seed and count; no deep-sky objects
    Random { seed: u64, count: usize },
}

/// Lazily loaded, immutable catalog records for one source
#[derive(Debug)]
pub struct CatalogStore {
    source: CatalogSource,
    magnitude_limit: f64,
    stars: OnceCell<Arc<[StarRecord]>>,
    nebulae: OnceCell<Arc<[NebulaRecord]>>,
}

impl CatalogStore {
    /// Create a store; nothing is read until the first access
    pub fn new(source: CatalogSource, magnitude_limit: f64) -> Self {
        Self {
            source,
            magnitude_limit,
            stars: OnceCell::new(),
            nebulae: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Faintest magnitude kept from the star catalog
    pub fn magnitude_limit(&self) -> f64 {
        self.magnitude_limit
    }

    /// Star records with a position and within the magnitude limit
    pub fn stars(&self) -> Result<Arc<[StarRecord]>> {
        self.stars
            .get_or_try_init(|| -> Result<Arc<[StarRecord]>> {
                let records = self.load_stars()?;
                info!(
                    "Loaded {} stars (magnitude <= {})",
                    records.len(),
                    self.magnitude_limit
                );
                Ok(records.into())
            })
            .cloned()
    }

    /// Deep-sky records, empty if the catalog is unavailable
    pub fn nebulae(&self) -> Arc<[NebulaRecord]> {
        if let Some(records) = self.nebulae.get() {
            return records.clone();
        }

        match self.load_nebulae() {
            Ok(records) => {
                info!("Loaded {} deep-sky objects", records.len());
                self.nebulae.get_or_init(|| records.into()).clone()
            }
            Err(err) => {
                warn!("Deep-sky catalog unavailable, continuing without it: {}", err);
                Arc::from(Vec::new())
            }
        }
    }

    /// Place every star for an observer
    pub fn position_stars(&self, observer: &Observer) -> Result<Vec<CelestialObject>> {
        let records = self.stars()?;
        info!(
            "Positioning {} stars for observer at Lat={:.2}° Lon={:.2}°",
            records.len(),
            observer.latitude,
            observer.longitude
        );
        Ok(records
            .iter()
            .filter_map(|record| record.place(observer))
            .map(CelestialObject::Star)
            .collect())
    }

    /// Place every deep-sky object for an observer
    pub fn position_nebulae(&self, observer: &Observer) -> Vec<CelestialObject> {
        self.nebulae()
            .iter()
            .map(|record| CelestialObject::Nebula(record.place(observer)))
            .collect()
    }

    fn load_stars(&self) -> Result<Vec<StarRecord>> {
        match &self.source {
            CatalogSource::Directory(dir) => {
                let json = read_catalog_file(dir, STAR_CATALOG_FILE)?;
                parse_stars(&json, STAR_CATALOG_FILE, self.magnitude_limit)
            }
            CatalogSource::Bundled => {
                parse_stars(BUNDLED_STARS, STAR_CATALOG_FILE, self.magnitude_limit)
            }
            CatalogSource::Inline { stars, .. } => {
                Ok(stars::filter_records(stars.clone(), self.magnitude_limit))
            }
            CatalogSource::Random { seed, count } => {
                debug!("Using {} synthetic stars (seed {})", count, seed);
                Ok(stars::filter_records(
                    generate_star_records(*count, *seed),
                    self.magnitude_limit,
                ))
            }
        }
    }

    fn load_nebulae(&self) -> Result<Vec<NebulaRecord>> {
        match &self.source {
            CatalogSource::Directory(dir) => {
                let json = read_catalog_file(dir, NEBULA_CATALOG_FILE)?;
                parse_nebulae(&json, NEBULA_CATALOG_FILE)
            }
            CatalogSource::Bundled => parse_nebulae(BUNDLED_NEBULAE, NEBULA_CATALOG_FILE),
            CatalogSource::Inline { nebulae, .. } => Ok(nebulae.clone()),
            CatalogSource::Random { .. } => Ok(Vec::new()),
        }
    }
}

fn parse_stars(json: &str, name: &str, magnitude_limit: f64) -> Result<Vec<StarRecord>> {
    stars::parse_records(json, magnitude_limit)
        .map_err(|e| StarMapError::MalformedResource(format!("{}: {}", name, e)))
}

fn parse_nebulae(json: &str, name: &str) -> Result<Vec<NebulaRecord>> {
    nebulae::parse_records(json)
        .map_err(|e| StarMapError::MalformedResource(format!("{}: {}", name, e)))
}

/// Read `name` from `dir`, falling back to `name.gz`
fn read_catalog_file(dir: &Path, name: &str) -> Result<String> {
    let plain = dir.join(name);
    let gzipped = dir.join(format!("{}.gz", name));

    let path = if plain.is_file() {
        plain
    } else if gzipped.is_file() {
        gzipped
    } else {
        return Err(StarMapError::MissingResource(format!(
            "{} not found in {}",
            name,
            dir.display()
        )));
    };

    let file = File::open(&path)?;
    let mut reader: Box<dyn Read> = if path.to_string_lossy().ends_with(".gz") {
        debug!("Loading gzipped catalog: {}", path.display());
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        debug!("Loading catalog: {}", path.display());
        Box::new(BufReader::new(file))
    };

    let mut json = String::new();
    reader
        .read_to_string(&mut json)
        .map_err(|e| StarMapError::MalformedResource(format!("{}: {}", path.display(), e)))?;
    Ok(json)
}
