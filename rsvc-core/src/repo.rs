// rsvc-core/src/repo.rs
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use rsvc_common::backend::{InstallBackend, InstallSession};
use rsvc_common::catalog::Catalog;
use rsvc_common::config::{make_full_type_name, simple_name, Config, SERVICE_NAMESPACE};
use rsvc_common::dependency::{Resolver, UnfulfilledSet};
use rsvc_common::error::Result;
use rsvc_common::events::{self, InstallEvent, LoggingSink};
use rsvc_common::status::{self, Status};
use rsvc_common::store::DependencyStore;
use tracing::{debug, error, info};

/// One engine instance: a backend plus the store, sinks and error log it works against.
pub struct Repo {
    config: Config,
    catalog: Arc<dyn Catalog>,
    backend: Box<dyn InstallBackend>,
    store: DependencyStore,
    sinks: Vec<Arc<dyn LoggingSink>>,
    errors: Vec<Status>,
}

impl Repo {
    /// Builds an engine, loading the persisted store named by `config`.
    pub fn new(
        config: Config,
        catalog: Arc<dyn Catalog>,
        backend: Box<dyn InstallBackend>,
    ) -> Result<Self> {
        let store = DependencyStore::load_for_config(&config)?;
        Ok(Self::with_store(config, catalog, backend, store))
    }

    pub fn with_store(
        config: Config,
        catalog: Arc<dyn Catalog>,
        backend: Box<dyn InstallBackend>,
        store: DependencyStore,
    ) -> Self {
        debug!(
            "Repo created for backend '{}' with {} known libraries",
            backend.name(),
            store.len()
        );
        Self {
            config,
            catalog,
            backend,
            store,
            sinks: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn store(&self) -> &DependencyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DependencyStore {
        &mut self.store
    }

    pub fn unfulfilled(&mut self, type_name: &str) -> UnfulfilledSet {
        let mut resolver = Resolver::new(self.catalog.as_ref(), &self.store);
        let unfulfilled = resolver.unfulfilled(type_name);
        self.errors.extend(resolver.into_errors());
        unfulfilled
    }

    pub fn is_installed(&mut self, type_name: &str) -> bool {
        let mut resolver = Resolver::new(self.catalog.as_ref(), &self.store);
        let installed = resolver.is_installed(type_name);
        self.errors.extend(resolver.into_errors());
        installed
    }

    /// Runs the backend once for every catalog type, in catalog order.
    pub fn install_all(&mut self) {
        let names: Vec<String> = self
            .catalog
            .list_types()
            .iter()
            .map(|t| t.name.clone())
            .collect();
        let total_types = names.len();

        self.emit(InstallEvent::InstallationStarted { total_types });
        for name in &names {
            self.install_type(name);
        }
        self.emit(InstallEvent::InstallationFinished { total_types });
    }

    /// Installs into the configured install directory. Returns whether the backend succeeded.
    pub fn install_type(&mut self, type_name: &str) -> bool {
        let location = self.config.install_dir();
        self.install_type_at(&location, type_name)
    }

    pub fn install_type_at(&mut self, location: &Path, type_name: &str) -> bool {
        let full_name = make_full_type_name(type_name, SERVICE_NAMESPACE);
        let backend_type_name = backend_type_name(&full_name);
        debug!(
            "Installing {} into {} via {}",
            full_name,
            location.display(),
            self.backend.name()
        );

        let cache_dir = self.config.cache_dir();
        let result = {
            let mut session = InstallSession::new(
                self.catalog.as_ref(),
                &mut self.store,
                &self.sinks,
                &mut self.errors,
                &cache_dir,
            );
            self.backend
                .install_at(&mut session, location, backend_type_name)
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                error!("installing {} failed: {}", full_name, e);
                self.errors.push(Status::error(
                    status::INSTALL_FAILED,
                    format!("{full_name}: {e}"),
                ));
                self.broadcast(format_args!("failed to install {full_name}: {e}"));
                false
            }
        }
    }

    /// Wipes the store (memory, state file, install and cache trees) and the error log.
    pub fn clear(&mut self) {
        info!("clearing repo for backend '{}'", self.backend.name());
        self.store.clear();
        info!("clearing errors");
        self.clear_errors();
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn errors(&self) -> &[Status] {
        &self.errors
    }

    pub fn add_sink(&mut self, sink: Arc<dyn LoggingSink>) {
        self.sinks.push(sink);
    }

    pub fn broadcast(&self, args: fmt::Arguments<'_>) {
        events::broadcast(&self.sinks, args);
    }

    fn emit(&self, event: InstallEvent) {
        debug!("emitting {:?}", event);
        for sink in &self.sinks {
            sink.event(&event);
        }
    }

    pub fn save(&self) -> Result<()> {
        self.store.save()
    }
}

/// Types in the service namespace are handed to backends by simple name; others keep
/// their full name so the backend can still find them.
fn backend_type_name(full_name: &str) -> &str {
    let simple = simple_name(full_name);
    if make_full_type_name(simple, SERVICE_NAMESPACE) == full_name {
        simple
    } else {
        full_name
    }
}
