// rsvc/src/cli.rs
//! Command-line argument structure and the shared plumbing the commands use.
use std::sync::{Arc, MutexGuard, PoisonError};

use clap::{ArgAction, Parser, Subcommand};
use rsvc_common::catalog::{Catalog, ServiceData};
use rsvc_common::config::Config;
use rsvc_common::error::{Result, RsvcError};
use rsvc_core::{BackendRegistry, Repo, SharedRepo, TracingSink};
use rsvc_net::{MavenBackend, MAVEN_BACKEND_NAME};
use tracing::{debug, warn};

use crate::console::{print_statuses, ConsoleSink};

pub mod clear;
pub mod install;
pub mod list;
pub mod mark;
pub mod status;

use crate::cli::clear::Clear;
use crate::cli::install::Install;
use crate::cli::list::List;
use crate::cli::mark::MarkInstalled;
use crate::cli::status::Status;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "rsvc", bin_name = "rsvc")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Install backend to use (overrides RSVC_BACKEND)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Install(Install),
    Status(Status),
    List(List),
    Clear(Clear),
    MarkInstalled(MarkInstalled),
}

impl Command {
    pub fn run(&self, config: &Config, verbose: u8) -> Result<()> {
        match self {
            Self::Install(command) => command.run(&Session::open(config, verbose, true)?),
            Self::Status(command) => command.run(&Session::open(config, verbose, true)?),
            Self::List(command) => command.run(&Session::open(config, verbose, true)?),
            Self::Clear(command) => command.run(config, verbose),
            Self::MarkInstalled(command) => {
                command.run(&Session::open(config, verbose, false)?)
            }
        }
    }
}

/// Registry, catalog and the selected backend's engine for one CLI invocation.
pub struct Session {
    pub catalog: Arc<dyn Catalog>,
    pub registry: BackendRegistry,
    repo: SharedRepo,
}

impl Session {
    /// `require_catalog` turns a missing catalog file into an error; otherwise an
    /// empty catalog is used.
    pub fn open(config: &Config, verbose: u8, require_catalog: bool) -> Result<Self> {
        let catalog_file = config.catalog_file();
        let catalog: Arc<dyn Catalog> = match ServiceData::load(&catalog_file) {
            Ok(data) => Arc::new(data),
            Err(RsvcError::NotFound(_)) if !require_catalog => {
                warn!(
                    "No catalog at {}, continuing with an empty one",
                    catalog_file.display()
                );
                Arc::new(ServiceData::new())
            }
            Err(e) => return Err(e),
        };
        debug!(
            "Catalog {} lists {} service types",
            catalog_file.display(),
            catalog.list_types().len()
        );

        let mut registry = BackendRegistry::new(config.clone(), Arc::clone(&catalog));
        registry.register(MAVEN_BACKEND_NAME, MavenBackend::from_config);

        let repo = match registry.get_default_instance() {
            Some(repo) => repo,
            None => {
                let errors = registry.errors();
                print_statuses(&errors);
                return Err(RsvcError::UnknownBackend(format!(
                    "{} (available: {})",
                    config.default_backend,
                    registry.backend_names().join(", ")
                )));
            }
        };

        {
            let mut guard = repo.lock().unwrap_or_else(PoisonError::into_inner);
            guard.add_sink(Arc::new(ConsoleSink));
            if verbose > 0 {
                guard.add_sink(Arc::new(TracingSink));
            }
        }

        Ok(Self {
            catalog,
            registry,
            repo,
        })
    }

    pub fn repo(&self) -> MutexGuard<'_, Repo> {
        self.repo.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Prints what the engine recorded and fails if any of it was an error.
pub fn report_errors(repo: &Repo, what: &str) -> Result<()> {
    let errors = repo.errors();
    print_statuses(errors);
    let count = errors.iter().filter(|s| s.is_error()).count();
    if count == 0 {
        Ok(())
    } else {
        Err(RsvcError::InstallError(format!(
            "{count} problem(s) while {what}"
        )))
    }
}
