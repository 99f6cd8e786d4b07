//! Locations of the data files and the tunables used while processing them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Where the pipeline reads and writes its files, and how strictly it checks them.
///
/// Every loader takes the config explicitly; there is no process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding inputs and persisted matrices.
    pub data_dir: PathBuf,
    /// Tower location CSV, relative to `data_dir`.
    pub towers_file: PathBuf,
    /// Voronoi cells GeoJSON, relative to `data_dir`.
    pub voronoi_file: PathBuf,
    /// Tower names are this prefix followed by the tower index.
    pub tower_prefix: String,
    /// Relative tolerance for the tessellation area check.
    pub tolerance: f64,
    /// Wall-clock budget for each matrix computation, if any.
    pub timeout_secs: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/brazil-towers-voronoi-mobility"),
            towers_file: PathBuf::from("towers_br.csv"),
            voronoi_file: PathBuf::from("brazil-voronoi.json"),
            tower_prefix: "br".to_string(),
            tolerance: 1e-4,
            timeout_secs: None,
        }
    }
}

impl DataConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the tunables are usable.
    pub fn validate(&self) -> Result<()> {
        if self.tower_prefix.chars().any(|c| c.is_ascii_digit()) {
            return Err(Error::Config(format!("tower_prefix {:?} must not contain digits", self.tower_prefix)));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(Error::Config(format!("tolerance must be a non-negative number, got {}", self.tolerance)));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::Config("timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }

    #[inline] pub fn towers_path(&self) -> PathBuf { self.data_dir.join(&self.towers_file) }

    #[inline] pub fn voronoi_path(&self) -> PathBuf { self.data_dir.join(&self.voronoi_file) }

    /// GeoJSON administrative regions for a country and admin level.
    #[inline]
    pub fn admin_geojson_path(&self, country: &str) -> PathBuf {
        self.data_dir.join(format!("{country}-shape.json"))
    }

    /// Persisted tower-to-admin matrix (row = admin, column = tower).
    #[inline]
    pub fn tower_admin_path(&self, country: &str) -> PathBuf {
        self.data_dir.join(format!("{country}-tower-to-admin.csv"))
    }

    /// Persisted admin-to-tower matrix (row = tower, column = admin).
    #[inline]
    pub fn admin_tower_path(&self, country: &str) -> PathBuf {
        self.data_dir.join(format!("{country}-admin-to-tower.csv"))
    }

    /// Persisted admin-to-admin matrix for one day.
    #[inline]
    pub fn admin_admin_path(&self, country: &str, day: &str) -> PathBuf {
        self.data_dir.join(format!("{country}-{day}-admin-to-admin.csv"))
    }

    /// The per-computation budget, if one is configured.
    #[inline] pub fn timeout(&self) -> Option<Duration> { self.timeout_secs.map(Duration::from_secs) }
}
