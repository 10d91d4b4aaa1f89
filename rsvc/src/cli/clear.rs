// rsvc/src/cli/clear.rs
use clap::Args;
use colored::Colorize;
use rsvc_common::config::Config;
use rsvc_common::error::Result;
use rsvc_common::store::DependencyStore;
use tracing::warn;

use crate::cli::Session;

/// Forget all installed state and delete installed and cached artifacts
#[derive(Debug, Args)]
pub struct Clear;

impl Clear {
    pub fn run(&self, config: &Config, verbose: u8) -> Result<()> {
        match Session::open(config, verbose, false) {
            Ok(session) => {
                session.repo().clear();
                session.registry.clear_errors();
            }
            // An unreadable state file must not block wiping it.
            Err(e) => {
                warn!("Could not open repo ({}), clearing files directly", e);
                DependencyStore::for_config(config).clear();
            }
        }
        println!("{} cleared {}", "==>".bold().blue(), config.root().display());
        Ok(())
    }
}
