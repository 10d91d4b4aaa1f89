// rsvc/src/cli/mark.rs
use clap::Args;
use colored::Colorize;
use rsvc_common::error::Result;
use rsvc_common::model::LibraryDependency;

use crate::cli::Session;

/// Record a library as installed without fetching it
#[derive(Debug, Args)]
pub struct MarkInstalled {
    /// Coordinate as group:artifact:version[:ext]
    pub coordinate: LibraryDependency,
}

impl MarkInstalled {
    pub fn run(&self, session: &Session) -> Result<()> {
        let mut repo = session.repo();
        repo.store_mut().mark_installed(&self.coordinate);
        repo.save()?;
        println!("{} marked {} installed", "==>".bold().blue(), self.coordinate);
        Ok(())
    }
}
