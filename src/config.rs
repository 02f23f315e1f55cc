//! Engine configuration
//!
//! A [`Config`] names the prepared dataset and carries the tunables handed to
//! the engine at load time. Construction validates the dataset fingerprint
//! but never loads the dataset itself, so a bad path fails fast here rather
//! than during the much more expensive engine load.

use crate::engine::EngineLoader;
use crate::error::{Error, Result};
use crate::fingerprint::Fingerprint;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Routing algorithm the dataset was prepared for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    /// Contraction Hierarchies
    Ch,
    /// Multi-Level Dijkstra
    Mld,
}

/// Optional dataset sections the engine can skip loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureDataset {
    /// Turn-by-turn step data
    RouteSteps,
    /// Full route geometry
    RouteGeometry,
}

impl FromStr for FeatureDataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "route_steps" => Ok(FeatureDataset::RouteSteps),
            "route_geometry" => Ok(FeatureDataset::RouteGeometry),
            _ => Err(Error::invalid(format!("unknown feature dataset '{}'", s))),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    base_path: Option<PathBuf>,
    dataset_version: Option<String>,
    algorithm: Option<Algorithm>,
    max_locations_trip: i32,
    max_locations_viaroute: i32,
    max_locations_distance_table: i32,
    max_locations_map_matching: i32,
    max_radius_map_matching: f64,
    max_results_nearest: i32,
    default_radius: f64,
    max_alternatives: i32,
    use_mmap: bool,
    use_shared_memory: bool,
    dataset_name: Option<String>,
    memory_file: Option<PathBuf>,
    verbosity: Option<String>,
    disable_feature_dataset: Vec<FeatureDataset>,
    #[serde(skip)]
    loader: Option<Arc<dyn EngineLoader>>,
}

impl Config {
    /// Configuration for a dataset on disk
    ///
    /// `base_path` is the dataset base (e.g. `berlin.osrm`); its fingerprint
    /// must exist and match this build's dataset major version.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref();
        if base_path.as_os_str().is_empty() {
            return Err(Error::ConfigInvalid("dataset path is empty".to_string()));
        }
        let fingerprint = Fingerprint::read_for(base_path)?;
        log::debug!(
            "dataset {} validated (version {})",
            base_path.display(),
            fingerprint
        );

        let mut config = Config::defaults();
        config.base_path = Some(base_path.to_path_buf());
        config.dataset_version = Some(fingerprint.to_string());
        config.use_shared_memory = false;
        Ok(config)
    }

    /// Configuration attaching to a dataset already held in shared memory
    pub fn shared_memory() -> Self {
        Config::defaults()
    }

    fn defaults() -> Self {
        Config {
            base_path: None,
            dataset_version: None,
            algorithm: None,
            max_locations_trip: -1,
            max_locations_viaroute: -1,
            max_locations_distance_table: -1,
            max_locations_map_matching: -1,
            max_radius_map_matching: -1.0,
            max_results_nearest: -1,
            default_radius: -1.0,
            max_alternatives: 3,
            use_mmap: true,
            use_shared_memory: true,
            dataset_name: None,
            memory_file: None,
            verbosity: None,
            disable_feature_dataset: Vec::new(),
            loader: None,
        }
    }

    /// Dataset base path, `None` in shared-memory mode
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Version recorded in the dataset fingerprint
    pub fn dataset_version(&self) -> Option<&str> {
        self.dataset_version.as_deref()
    }

    /// Explicit algorithm, `None` lets the engine detect it
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Select the routing algorithm
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
    }

    /// Maximum locations for the trip service (`-1` for unlimited)
    pub fn set_max_locations_trip(&mut self, max: i32) -> Result<()> {
        self.max_locations_trip = check_limit("max_locations_trip", max)?;
        Ok(())
    }

    /// Maximum locations for the route service (`-1` for unlimited)
    pub fn set_max_locations_viaroute(&mut self, max: i32) -> Result<()> {
        self.max_locations_viaroute = check_limit("max_locations_viaroute", max)?;
        Ok(())
    }

    /// Maximum locations for the table service (`-1` for unlimited)
    pub fn set_max_locations_distance_table(&mut self, max: i32) -> Result<()> {
        self.max_locations_distance_table = check_limit("max_locations_distance_table", max)?;
        Ok(())
    }

    /// Maximum locations for the match service (`-1` for unlimited)
    pub fn set_max_locations_map_matching(&mut self, max: i32) -> Result<()> {
        self.max_locations_map_matching = check_limit("max_locations_map_matching", max)?;
        Ok(())
    }

    /// Maximum search radius in meters for map matching (`-1.0` for unlimited)
    pub fn set_max_radius_map_matching(&mut self, radius: f64) -> Result<()> {
        self.max_radius_map_matching = check_radius("max_radius_map_matching", radius)?;
        Ok(())
    }

    /// Maximum results for the nearest service (`-1` for unlimited)
    pub fn set_max_results_nearest(&mut self, max: i32) -> Result<()> {
        self.max_results_nearest = check_limit("max_results_nearest", max)?;
        Ok(())
    }

    /// Default snapping radius in meters (`-1.0` for the engine default)
    pub fn set_default_radius(&mut self, radius: f64) -> Result<()> {
        self.default_radius = check_radius("default_radius", radius)?;
        Ok(())
    }

    /// Maximum alternative routes (`-1` for unlimited)
    pub fn set_max_alternatives(&mut self, max: i32) -> Result<()> {
        self.max_alternatives = check_limit("max_alternatives", max)?;
        Ok(())
    }

    /// Memory-map dataset files instead of reading them
    pub fn set_use_mmap(&mut self, on: bool) {
        self.use_mmap = on;
    }

    /// Attach to a shared-memory dataset
    pub fn set_use_shared_memory(&mut self, on: bool) {
        self.use_shared_memory = on;
    }

    /// Named shared-memory dataset, `None` clears
    pub fn set_dataset_name(&mut self, name: Option<String>) {
        self.dataset_name = name;
    }

    /// Backing file for the dataset, `None` clears
    pub fn set_memory_file(&mut self, path: Option<PathBuf>) {
        self.memory_file = path;
    }

    /// Engine log verbosity, `None` clears
    pub fn set_verbosity(&mut self, verbosity: Option<String>) {
        self.verbosity = verbosity;
    }

    /// Skip loading an optional dataset section
    pub fn disable_feature_dataset(&mut self, dataset: FeatureDataset) {
        if !self.disable_feature_dataset.contains(&dataset) {
            self.disable_feature_dataset.push(dataset);
        }
    }

    /// Load every optional dataset section again
    pub fn clear_disabled_feature_datasets(&mut self) {
        self.disable_feature_dataset.clear();
    }

    /// Sections the engine will skip
    pub fn disabled_feature_datasets(&self) -> &[FeatureDataset] {
        &self.disable_feature_dataset
    }

    /// Install the loader that links the external engine
    pub fn set_loader(&mut self, loader: Arc<dyn EngineLoader>) {
        self.loader = Some(loader);
    }

    /// Installed engine loader
    pub fn loader(&self) -> Option<&Arc<dyn EngineLoader>> {
        self.loader.as_ref()
    }

    /// Serialize the engine options as the JSON document native engines receive
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::ConfigInvalid(format!("cannot serialize configuration: {}", e)))
    }
}

fn check_limit(name: &str, value: i32) -> Result<i32> {
    if value < -1 {
        return Err(Error::invalid(format!(
            "{} must be -1 (unlimited) or non-negative, got {}",
            name, value
        )));
    }
    Ok(value)
}

fn check_radius(name: &str, value: f64) -> Result<f64> {
    if value.is_nan() || (value < 0.0 && value != -1.0) {
        return Err(Error::invalid(format!(
            "{} must be -1.0 (unlimited) or non-negative, got {}",
            name, value
        )));
    }
    Ok(value)
}
