//! Engine instance and service invocation

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::params::{Params, ServiceKind};
use crate::response::Response;
use std::fmt;
use std::time::Instant;

/// A loaded routing engine
///
/// Built once from a [`Config`] and shared by every query. The instance is
/// `Send + Sync`; concurrent invocations need no external locking.
///
/// # Example
///
/// ```no_run
/// use osrmc::{Config, Osrm, Params, ServiceKind};
///
/// let config = Config::new("berlin.osrm")?;
/// let osrm = Osrm::new(&config)?;
///
/// let mut params = Params::new(ServiceKind::Route);
/// params.add_coordinate(13.388860, 52.517037)?;
/// params.add_coordinate(13.397634, 52.529407)?;
///
/// let response = osrm.route(&params)?;
/// println!("{}", String::from_utf8_lossy(response.primary().as_bytes()));
/// # Ok::<(), osrmc::Error>(())
/// ```
pub struct Osrm {
    engine: Box<dyn Engine>,
    dataset: String,
}

impl Osrm {
    /// Load the engine described by `config`
    ///
    /// The configuration may be dropped right after this returns.
    pub fn new(config: &Config) -> Result<Self> {
        let dataset = match config.base_path() {
            Some(path) => path.display().to_string(),
            None => "<shared memory>".to_string(),
        };
        let loader = config.loader().ok_or_else(|| {
            Error::EngineLoadFailed(format!("no engine linked to load {}", dataset))
        })?;

        let start = Instant::now();
        let engine = loader.load(config).map_err(|failure| {
            let failure = failure.normalized();
            log::debug!("engine load for {} failed: {}", dataset, failure);
            Error::EngineLoadFailed(format!(
                "engine failed to load {}: [{}] {}",
                dataset, failure.code, failure.message
            ))
        })?;
        log::debug!("engine loaded {} in {:?}", dataset, start.elapsed());

        Ok(Osrm { engine, dataset })
    }

    /// Snap a coordinate to the network
    pub fn nearest(&self, params: &Params) -> Result<Response> {
        self.invoke(ServiceKind::Nearest, params)
    }

    /// Fastest route through the coordinates
    pub fn route(&self, params: &Params) -> Result<Response> {
        self.invoke(ServiceKind::Route, params)
    }

    /// Duration/distance matrix between the coordinates
    pub fn table(&self, params: &Params) -> Result<Response> {
        self.invoke(ServiceKind::Table, params)
    }

    /// Map-match a trace
    pub fn match_trace(&self, params: &Params) -> Result<Response> {
        self.invoke(ServiceKind::Match, params)
    }

    /// Round trip through the coordinates
    pub fn trip(&self, params: &Params) -> Result<Response> {
        self.invoke(ServiceKind::Trip, params)
    }

    /// Vector tile of the routing graph
    pub fn tile(&self, params: &Params) -> Result<Response> {
        self.invoke(ServiceKind::Tile, params)
    }

    /// Validate `params` for `kind` and delegate to the engine
    pub fn invoke(&self, kind: ServiceKind, params: &Params) -> Result<Response> {
        params.validate_for(kind).map_err(|e| {
            log::debug!("{} rejected before engine: {}", kind, e);
            e
        })?;

        let start = Instant::now();
        let payload = self.engine.query(kind, params).map_err(|failure| {
            log::debug!("{} failed in engine: {}", kind, failure);
            Error::from(failure)
        })?;
        log::trace!(
            "{} on {} returned {} bytes in {:?}",
            kind,
            self.dataset,
            payload.len(),
            start.elapsed()
        );

        Ok(Response::new(kind, params.format(), payload))
    }
}

impl fmt::Debug for Osrm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Osrm").field("dataset", &self.dataset).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineFailure, EngineLoader};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct CountingLoader {
        queries: Arc<AtomicUsize>,
    }

    struct CountingEngine {
        queries: Arc<AtomicUsize>,
    }

    impl Engine for CountingEngine {
        fn query(&self, service: ServiceKind, _params: &Params) -> std::result::Result<Vec<u8>, EngineFailure> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(format!(r#"{{"code":"Ok","service":"{}"}}"#, service).into_bytes())
        }
    }

    impl EngineLoader for CountingLoader {
        fn load(&self, _config: &Config) -> std::result::Result<Box<dyn Engine>, EngineFailure> {
            Ok(Box::new(CountingEngine {
                queries: Arc::clone(&self.queries),
            }))
        }
    }

    fn osrm() -> (Osrm, Arc<AtomicUsize>) {
        let loader = CountingLoader::default();
        let queries = Arc::clone(&loader.queries);
        let mut config = Config::shared_memory();
        config.set_loader(Arc::new(loader));
        (Osrm::new(&config).unwrap(), queries)
    }

    #[test]
    fn test_no_loader() {
        let err = Osrm::new(&Config::shared_memory()).unwrap_err();
        assert_eq!(err.code(), "ENGINE_LOAD_FAILED");
    }

    #[test]
    fn test_validation_precedes_engine() {
        let (osrm, queries) = osrm();
        let table = Params::new(ServiceKind::Table);
        assert_eq!(osrm.table(&table).unwrap_err().code(), "TOO_FEW_COORDINATES");
        assert_eq!(osrm.route(&table).unwrap_err().code(), "WRONG_SERVICE_TYPE");
        assert_eq!(queries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_response_tagged() {
        let (osrm, queries) = osrm();
        let mut params = Params::new(ServiceKind::Nearest);
        params.add_coordinate(13.388860, 52.517037).unwrap();
        let resp = osrm.nearest(&params).unwrap();
        assert_eq!(resp.service(), ServiceKind::Nearest);
        assert_eq!(resp.to_json_value().unwrap()["service"], "nearest");
        assert_eq!(queries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_instance_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Osrm>();
    }
}
