// rsvc-common/src/model/library.rs
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RsvcError;

const DEFAULT_EXT: &str = "jar";

/// A library a service type needs on disk, identified by its `group:artifact:version` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    /// Expected SHA-256 of the artifact, hex encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl LibraryDependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            ext: None,
            sha256: None,
        }
    }

    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.sha256 = Some(sha256.into());
        self
    }

    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    pub fn extension(&self) -> &str {
        self.ext.as_deref().unwrap_or(DEFAULT_EXT)
    }

    /// `artifact-version.ext`
    pub fn file_name(&self) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, self.extension())
    }

    /// Path of the artifact inside a Maven-layout repository, e.g. `org/foo/bar/1.0/bar-1.0.jar`.
    pub fn repository_path(&self) -> PathBuf {
        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(&self.version);
        path.push(self.file_name());
        path
    }

    /// Same as [`repository_path`](Self::repository_path) but always `/` separated, for URLs.
    pub fn repository_url_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.file_name()
        )
    }
}

impl fmt::Display for LibraryDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Parses `group:artifact:version` or `group:artifact:version:ext`.
impl FromStr for LibraryDependency {
    type Err = RsvcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(RsvcError::InvalidCoordinate(
                s.to_string(),
                "empty segment".to_string(),
            ));
        }
        match parts.as_slice() {
            [group, artifact, version] => Ok(Self::new(*group, *artifact, *version)),
            [group, artifact, version, ext] => {
                Ok(Self::new(*group, *artifact, *version).with_ext(*ext))
            }
            _ => Err(RsvcError::InvalidCoordinate(
                s.to_string(),
                format!("expected 3 or 4 ':' separated segments, got {}", parts.len()),
            )),
        }
    }
}

/// A dependency as tracked by the store. The key is always derived from `dependency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    dependency: LibraryDependency,
    pub installed: bool,
}

impl DependencyRecord {
    pub fn new(dependency: LibraryDependency, installed: bool) -> Self {
        Self {
            dependency,
            installed,
        }
    }

    pub fn key(&self) -> String {
        self.dependency.key()
    }

    pub fn dependency(&self) -> &LibraryDependency {
        &self.dependency
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }
}
