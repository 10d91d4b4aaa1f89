// rsvc/src/cli/install.rs
use clap::Args;
use colored::Colorize;
use rsvc_common::error::{Result, RsvcError};
use tracing::debug;

use crate::cli::{report_errors, Session};

/// Install the libraries of one service type, or of every catalogued type
#[derive(Debug, Args)]
pub struct Install {
    /// Service type name, bare ("Servo") or fully qualified; omit to install all
    pub type_name: Option<String>,
}

impl Install {
    pub fn run(&self, session: &Session) -> Result<()> {
        let mut repo = session.repo();
        debug!("Installing with backend {}", repo.backend_name());

        match &self.type_name {
            Some(type_name) => {
                if repo.install_type(type_name) {
                    debug!("Backend reported success for {}", type_name);
                }
            }
            None => repo.install_all(),
        }

        // Persist whatever did get installed, even if some of it failed.
        repo.save()?;
        report_errors(&repo, "installing")?;

        if let Some(type_name) = &self.type_name {
            if !repo.is_installed(type_name) {
                return Err(RsvcError::InstallError(format!(
                    "{type_name} is still missing libraries"
                )));
            }
        }
        println!("{}", "Done.".green().bold());
        Ok(())
    }
}
