//! Starmap: observer-relative sky positioning for live star maps
//!
//! This crate places stars, planets and deep-sky objects on the sky of an
//! observer, rotates them by the viewing orientation of a phone or a manual
//! pitch/yaw, and projects them onto a screen for drawing and tap selection.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub mod catalogs;
pub mod celestial;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod observer;
pub mod orientation;
pub mod planetlib;
pub mod projection;
pub mod scheduler;
pub mod sky;
pub mod time;

// Re-export commonly used types
pub use catalogs::{CatalogSource, CatalogStore};
pub use celestial::{CelestialObject, ObjectFilter, ObjectKind};
pub use config::SkyConfig;
pub use coordinates::{Direction, EquatorialPosition, HorizontalPosition};
pub use observer::Observer;
pub use orientation::OrientationState;
pub use planetlib::{Body, EphemerisProvider, PlanetError};
pub use projection::{ScreenPoint, Viewport};
pub use sky::SkySession;

/// Main error type for the starmap library
#[derive(Debug, Error)]
pub enum StarMapError {
    #[error("Missing resource: {0}")]
    MissingResource(String),

    #[error("Malformed resource: {0}")]
    MalformedResource(String),

    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] PlanetError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for starmap operations
pub type Result<T> = std::result::Result<T, StarMapError>;

/// Entry point for assembling catalogs, configuration and ephemeris
///
/// ```rust
/// use starmap::Loader;
///
/// let session = Loader::new().bundled().build().unwrap();
/// assert!(session.stars().is_empty());
/// ```
pub struct Loader {
    source: CatalogSource,
    config_file: Option<PathBuf>,
    ephemeris_table: Option<PathBuf>,
    config: Option<SkyConfig>,
}

impl Loader {
    /// Create a loader reading the bundled catalogs with default settings
    pub fn new() -> Self {
        Self {
            source: CatalogSource::Bundled,
            config_file: None,
            ephemeris_table: None,
            config: None,
        }
    }

    /// Read catalogs from a data directory
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = CatalogSource::Directory(path.as_ref().to_path_buf());
        self
    }

    /// Use the catalogs compiled into the crate
    pub fn bundled(mut self) -> Self {
        self.source = CatalogSource::Bundled;
        self
    }

    /// Use a random synthetic star field instead of a catalog
    pub fn random(mut self, seed: u64, count: usize) -> Self {
        self.source = CatalogSource::Random { seed, count };
        self
    }

    /// Use an explicit catalog source
    pub fn with_source(mut self, source: CatalogSource) -> Self {
        self.source = source;
        self
    }

    /// Read settings from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use the given settings; a config file, if set, takes precedence
    pub fn with_config(mut self, config: SkyConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Serve planet positions from a tabulated ephemeris file (JSON, optionally gzipped)
    pub fn with_ephemeris_table<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.ephemeris_table = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the settings this loader was configured with
    pub fn load_config(&self) -> Result<SkyConfig> {
        let config = match &self.config_file {
            Some(path) => SkyConfig::load_from_file(path)?,
            None => self.config.clone().unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the ephemeris table, if one was configured
    pub fn load_ephemeris(&self) -> Result<Option<planetlib::TableEphemeris>> {
        match &self.ephemeris_table {
            Some(path) => Ok(Some(planetlib::TableEphemeris::from_file(path)?)),
            None => Ok(None),
        }
    }

    /// Assemble a session
    ///
    /// Catalogs are not read here; the first observer update loads them.
    pub fn build(self) -> Result<SkySession> {
        let config = self.load_config()?;
        let provider = self
            .load_ephemeris()?
            .map(|table| Arc::new(table) as Arc<dyn EphemerisProvider>);
        let catalogs = CatalogStore::new(self.source, config.star_magnitude_limit);

        Ok(SkySession::new(config, catalogs, provider))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
