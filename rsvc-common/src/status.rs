// rsvc-common/src/status.rs
use std::fmt;

use serde::{Deserialize, Serialize};

pub const UNKNOWN_TYPE: &str = "unknown_type";
pub const MISSING_PEER: &str = "missing_peer";
pub const PEER_CYCLE: &str = "peer_cycle";
pub const INSTALL_FAILED: &str = "install_failed";
pub const CONSTRUCTION_FAILED: &str = "construction_failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

/// One accumulated operational record. Nothing reads these to make decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub level: StatusLevel,
    pub key: String,
    pub detail: String,
}

impl Status {
    pub fn new(level: StatusLevel, key: &str, detail: impl Into<String>) -> Self {
        Self {
            level,
            key: key.to_string(),
            detail: detail.into(),
        }
    }

    pub fn error(key: &str, detail: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, key, detail)
    }

    pub fn warn(key: &str, detail: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warn, key, detail)
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            StatusLevel::Info => "info",
            StatusLevel::Warn => "warn",
            StatusLevel::Error => "error",
        };
        write!(f, "[{level}] {}: {}", self.key, self.detail)
    }
}
