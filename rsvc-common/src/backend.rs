// rsvc-common/src/backend.rs
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::dependency::{Resolver, UnfulfilledSet};
use crate::error::Result;
use crate::events::{self, LoggingSink};
use crate::model::LibraryDependency;
use crate::status::Status;
use crate::store::DependencyStore;

/// Performs the actual fetch/extract of a service type's libraries.
///
/// How a coordinate maps to an artifact is entirely up to the implementation.
/// A successful install is expected to call [`InstallSession::mark_installed`]
/// for every library it put in place.
pub trait InstallBackend: Send + Sync {
    fn name(&self) -> &str;

    fn install_at(
        &self,
        session: &mut InstallSession<'_>,
        location: &Path,
        type_name: &str,
    ) -> Result<()>;
}

/// What a backend may touch while installing one type.
pub struct InstallSession<'a> {
    catalog: &'a dyn Catalog,
    store: &'a mut DependencyStore,
    sinks: &'a [Arc<dyn LoggingSink>],
    errors: &'a mut Vec<Status>,
    cache_dir: &'a Path,
}

impl<'a> InstallSession<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        store: &'a mut DependencyStore,
        sinks: &'a [Arc<dyn LoggingSink>],
        errors: &'a mut Vec<Status>,
        cache_dir: &'a Path,
    ) -> Self {
        Self {
            catalog,
            store,
            sinks,
            errors,
            cache_dir,
        }
    }

    /// Resolves against the current store; problems are appended to the engine's error list.
    pub fn unfulfilled(&mut self, type_name: &str) -> UnfulfilledSet {
        let mut resolver = Resolver::new(self.catalog, self.store);
        let unfulfilled = resolver.unfulfilled(type_name);
        self.errors.extend(resolver.into_errors());
        unfulfilled
    }

    pub fn mark_installed(&mut self, dependency: &LibraryDependency) {
        self.store.mark_installed(dependency);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        events::broadcast(self.sinks, args);
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog
    }

    /// Scratch area for downloads; wiped by `clear`.
    pub fn cache_dir(&self) -> &Path {
        self.cache_dir
    }
}
