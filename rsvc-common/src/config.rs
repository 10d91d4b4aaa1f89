// rsvc-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::debug;

use super::error::{Result, RsvcError};

/// Namespace prepended to bare service type names ("Servo" -> "org.myrobotlab.service.Servo").
pub const SERVICE_NAMESPACE: &str = "org.myrobotlab.service";
/// Namespace prepended to bare backend names ("Local" -> "org.myrobotlab.framework.repo.Local").
pub const BACKEND_NAMESPACE: &str = "org.myrobotlab.framework.repo";

pub const DEFAULT_BACKEND: &str = "Local";
pub const DEFAULT_MAVEN_URL: &str = "https://repo1.maven.org/maven2";

const REPO_STATE_FILE_NAME: &str = "repo.json";
const SERVICE_DATA_FILE_NAME: &str = "serviceData.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub default_backend: String,
    pub maven_url: String,
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading rsvc configuration");

        let root = match env::var("RSVC_ROOT").ok().filter(|s| !s.is_empty()) {
            Some(root) => PathBuf::from(root),
            None => env::current_dir().or_else(|e| {
                debug!("Working directory unavailable ({e}), falling back to home directory");
                UserDirs::new()
                    .map(|ud| ud.home_dir().join(".rsvc"))
                    .ok_or_else(|| {
                        RsvcError::Config(
                            "Could not determine a root directory; set RSVC_ROOT".to_string(),
                        )
                    })
            })?,
        };
        debug!("Effective root set to: {}", root.display());

        let default_backend = env::var("RSVC_BACKEND")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND.to_string());

        let maven_url = env::var("RSVC_MAVEN_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_MAVEN_URL.to_string());

        let catalog_path = env::var("RSVC_CATALOG")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        debug!("Configuration loaded successfully.");
        Ok(Self {
            root,
            default_backend,
            maven_url,
            catalog_path,
        })
    }

    /// Configuration rooted at an explicit directory, ignoring the environment.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_backend: DEFAULT_BACKEND.to_string(),
            maven_url: DEFAULT_MAVEN_URL.to_string(),
            catalog_path: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Install root, wiped whole by `clear`.
    pub fn libraries_dir(&self) -> PathBuf {
        self.root.join("libraries")
    }

    /// Default location handed to backends.
    pub fn install_dir(&self) -> PathBuf {
        self.libraries_dir().join("jar")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("repo")
    }

    pub fn mirror_dir(&self) -> PathBuf {
        self.root.join("mirror")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn state_file(&self) -> PathBuf {
        self.root.join(REPO_STATE_FILE_NAME)
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| self.root.join(SERVICE_DATA_FILE_NAME))
    }
}

/// Prefixes `name` with `namespace` unless it already contains a `.` separator.
pub fn make_full_type_name(name: &str, namespace: &str) -> String {
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// Last dotted segment of a fully-qualified name.
pub fn simple_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

pub fn load_config() -> Result<Config> {
    Config::load()
}
