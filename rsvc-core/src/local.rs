// rsvc-core/src/local.rs
use std::path::{Path, PathBuf};

use rsvc_common::backend::{InstallBackend, InstallSession};
use rsvc_common::config::Config;
use rsvc_common::error::{Result, RsvcError};
use rsvc_common::fs;
use tracing::{debug, warn};

pub const LOCAL_BACKEND_NAME: &str = "Local";

/// Installs libraries by copying them out of a Maven-layout directory on disk.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    mirror: PathBuf,
}

impl LocalBackend {
    pub fn new(mirror: impl Into<PathBuf>) -> Self {
        Self {
            mirror: mirror.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Box<dyn InstallBackend>> {
        Ok(Box::new(Self::new(config.mirror_dir())))
    }

    pub fn mirror(&self) -> &Path {
        &self.mirror
    }
}

impl InstallBackend for LocalBackend {
    fn name(&self) -> &str {
        LOCAL_BACKEND_NAME
    }

    fn install_at(
        &self,
        session: &mut InstallSession<'_>,
        location: &Path,
        type_name: &str,
    ) -> Result<()> {
        let unfulfilled = session.unfulfilled(type_name);
        if unfulfilled.is_empty() {
            debug!("{} has nothing to install", type_name);
            return Ok(());
        }

        session.info(format_args!(
            "installing {} libraries for {}",
            unfulfilled.len(),
            type_name
        ));

        let mut failed = Vec::new();
        for dependency in unfulfilled {
            let source = self.mirror.join(dependency.repository_path());
            if !source.is_file() {
                warn!("{} not found in mirror at {}", dependency, source.display());
                failed.push(dependency.key());
                continue;
            }
            match fs::copy_file(&source, &location.join(dependency.file_name())) {
                Ok(bytes) => {
                    debug!("Copied {} ({} bytes)", dependency, bytes);
                    session.mark_installed(&dependency);
                    session.info(format_args!("installed {dependency}"));
                }
                Err(e) => {
                    warn!("Failed to install {}: {}", dependency, e);
                    failed.push(dependency.key());
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(RsvcError::InstallError(format!(
                "{type_name}: could not install {}",
                failed.join(", ")
            )))
        }
    }
}
