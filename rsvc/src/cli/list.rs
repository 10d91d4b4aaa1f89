// rsvc/src/cli/list.rs
use clap::Args;
use colored::Colorize;
use rsvc_common::error::Result;

use crate::cli::Session;

/// List catalogued service types, or the libraries the store knows about
#[derive(Debug, Args)]
pub struct List {
    /// List stored library records instead of service types
    #[arg(long)]
    pub libraries: bool,
}

impl List {
    pub fn run(&self, session: &Session) -> Result<()> {
        let mut repo = session.repo();

        if self.libraries {
            if repo.store().is_empty() {
                println!("No libraries recorded.");
            }
            for record in repo.store().iter() {
                let state = if record.is_installed() {
                    "installed".green()
                } else {
                    "pending".yellow()
                };
                println!("{:<60} {}", record.key(), state);
            }
            return Ok(());
        }

        let types = session.catalog.list_types();
        if types.is_empty() {
            println!("No service types in catalog.");
            return Ok(());
        }
        for service_type in types {
            let marker = if repo.is_installed(&service_type.name) {
                "✓".green().bold()
            } else {
                "·".dimmed()
            };
            match &service_type.description {
                Some(description) => println!(
                    "{} {:<32} {}",
                    marker,
                    service_type.simple_name(),
                    description.dimmed()
                ),
                None => println!("{} {}", marker, service_type.simple_name()),
            }
        }
        Ok(())
    }
}
