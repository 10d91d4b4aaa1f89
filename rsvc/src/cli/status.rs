// rsvc/src/cli/status.rs
use clap::Args;
use colored::Colorize;
use rsvc_common::error::Result;

use crate::cli::{report_errors, Session};

/// Show whether a service type is installed and what it is missing
#[derive(Debug, Args)]
pub struct Status {
    pub type_name: String,
}

impl Status {
    pub fn run(&self, session: &Session) -> Result<()> {
        let mut repo = session.repo();
        let unfulfilled = repo.unfulfilled(&self.type_name);
        report_errors(&repo, "resolving")?;

        if unfulfilled.is_empty() {
            println!("{}: {}", self.type_name.bold(), "installed".green());
            return Ok(());
        }

        println!(
            "{}: {} ({} missing)",
            self.type_name.bold(),
            "not installed".yellow(),
            unfulfilled.len()
        );
        for dependency in &unfulfilled {
            println!("  {}", dependency.key());
        }
        Ok(())
    }
}
