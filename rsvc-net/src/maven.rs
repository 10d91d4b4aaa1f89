// rsvc-net/src/maven.rs
use std::path::Path;

use reqwest::blocking::Client;
use rsvc_common::backend::{InstallBackend, InstallSession};
use rsvc_common::config::Config;
use rsvc_common::error::{Result, RsvcError};
use rsvc_common::fs;
use rsvc_common::model::LibraryDependency;
use tracing::{debug, warn};
use url::Url;

use crate::http::{build_http_client, fetch_to_cache};
use crate::validation::validate_url;

pub const MAVEN_BACKEND_NAME: &str = "Maven";

/// Fetches libraries from a remote Maven-layout repository over HTTP.
///
/// Artifacts land in the session's cache first and are copied into the
/// install location from there, so repeated installs do not hit the network.
#[derive(Debug, Clone)]
pub struct MavenBackend {
    base_url: Url,
    client: Client,
}

impl MavenBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = validate_url(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            client: build_http_client()?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Box<dyn InstallBackend>> {
        Ok(Box::new(Self::new(&config.maven_url)?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn artifact_url(&self, dependency: &LibraryDependency) -> Result<Url> {
        self.base_url
            .join(&dependency.repository_url_path())
            .map_err(|e| {
                RsvcError::HttpError(format!("Cannot build URL for {dependency}: {e}"))
            })
    }

    fn install_one(
        &self,
        dependency: &LibraryDependency,
        cache_dir: &Path,
        location: &Path,
    ) -> Result<()> {
        let url = self.artifact_url(dependency)?;
        let cache_path = cache_dir.join(dependency.repository_path());
        let expected = dependency.sha256.as_deref().unwrap_or_default();
        let cached = fetch_to_cache(&self.client, url.as_str(), &cache_path, expected)?;
        let bytes = fs::copy_file(&cached, &location.join(dependency.file_name()))?;
        debug!("Installed {} ({} bytes) from {}", dependency, bytes, url);
        Ok(())
    }
}

impl InstallBackend for MavenBackend {
    fn name(&self) -> &str {
        MAVEN_BACKEND_NAME
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
            "downloading {} libraries for {} from {}",
            unfulfilled.len(),
            type_name,
            self.base_url
        ));

        let cache_dir = session.cache_dir().to_path_buf();
        let mut failed = Vec::new();
        for dependency in unfulfilled {
            match self.install_one(&dependency, &cache_dir, location) {
                Ok(()) => {
                    session.mark_installed(&dependency);
                    session.info(format_args!("installed {dependency}"));
                }
                Err(e) => {
                    warn!("Failed to install {}: {}", dependency, e);
                    session.info(format_args!("could not install {dependency}: {e}"));
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
