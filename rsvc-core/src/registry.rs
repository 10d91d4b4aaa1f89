// rsvc-core/src/registry.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use rsvc_common::backend::InstallBackend;
use rsvc_common::catalog::Catalog;
use rsvc_common::config::{make_full_type_name, Config, BACKEND_NAMESPACE};
use rsvc_common::error::{Result, RsvcError};
use rsvc_common::status::{self, Status};
use tracing::{debug, error};

use crate::local::{LocalBackend, LOCAL_BACKEND_NAME};
use crate::repo::Repo;

/// Builds a backend for a registry entry.
pub type BackendFactory = fn(&Config) -> Result<Box<dyn InstallBackend>>;

pub type SharedRepo = Arc<Mutex<Repo>>;

/// Process-wide cache of one [`Repo`] per backend.
///
/// Create it once at startup, register factories, then hand it by reference to
/// whoever needs an engine. [`reset`](Self::reset) is the teardown.
pub struct BackendRegistry {
    config: Config,
    catalog: Arc<dyn Catalog>,
    /// Keyed by canonical backend name.
    factories: HashMap<String, BackendFactory>,
    instances: Mutex<HashMap<String, SharedRepo>>,
    errors: Mutex<Vec<Status>>,
}

impl BackendRegistry {
    /// Registry with the built-in `Local` backend registered.
    pub fn new(config: Config, catalog: Arc<dyn Catalog>) -> Self {
        let mut registry = Self::empty(config, catalog);
        registry.register(LOCAL_BACKEND_NAME, LocalBackend::from_config);
        registry
    }

    pub fn empty(config: Config, catalog: Arc<dyn Catalog>) -> Self {
        Self {
            config,
            catalog,
            factories: HashMap::new(),
            instances: Mutex::new(HashMap::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn canonical_name(name: &str) -> String {
        make_full_type_name(name, BACKEND_NAMESPACE)
    }

    pub fn register(&mut self, name: &str, factory: BackendFactory) -> &mut Self {
        let canonical = Self::canonical_name(name);
        debug!("Registering backend factory {}", canonical);
        self.factories.insert(canonical, factory);
        self
    }

    pub fn backend_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn get_default_instance(&self) -> Option<SharedRepo> {
        self.get_instance(&self.config.default_backend)
    }

    /// Cached engine for `name`, constructing it on first use.
    /// Failures are logged and recorded; the caller gets `None`.
    ///
    /// The instance lock is held while the factory runs and the state file loads,
    /// so a slow construction also blocks lookups of other backends.
    pub fn get_instance(&self, name: &str) -> Option<SharedRepo> {
        let canonical = Self::canonical_name(name);
        let mut instances = self
            .instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(repo) = instances.get(&canonical) {
            return Some(Arc::clone(repo));
        }

        match self.construct(&canonical) {
            Ok(repo) => {
                let repo = Arc::new(Mutex::new(repo));
                instances.insert(canonical, Arc::clone(&repo));
                Some(repo)
            }
            Err(e) => {
                error!("instantiating {} failed: {}", canonical, e);
                self.errors
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(Status::error(
                        status::CONSTRUCTION_FAILED,
                        format!("{canonical}: {e}"),
                    ));
                None
            }
        }
    }

    fn construct(&self, canonical: &str) -> Result<Repo> {
        let factory = self
            .factories
            .get(canonical)
            .ok_or_else(|| RsvcError::UnknownBackend(canonical.to_string()))?;
        let backend = factory(&self.config)?;
        debug!("Constructed backend {} for {}", backend.name(), canonical);
        Repo::new(self.config.clone(), Arc::clone(&self.catalog), backend)
    }

    pub fn errors(&self) -> Vec<Status> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_errors(&self) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Drops every cached instance; the next `get_instance` builds afresh.
    pub fn reset(&self) {
        self.instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
