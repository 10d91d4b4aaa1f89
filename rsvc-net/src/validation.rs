// rsvc-net/src/validation.rs
use std::fs::File;
use std::io;
use std::path::Path;

use rsvc_common::error::{Result, RsvcError};
use sha2::{Digest, Sha256};
use url::Url;

pub fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    tracing::debug!("Verifying checksum for: {}", path.display());
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let bytes_copied = io::copy(&mut file, &mut hasher)?;
    let actual = hex::encode(hasher.finalize());
    tracing::debug!(
        "Calculated SHA256: {} ({} bytes read)",
        actual,
        bytes_copied
    );
    tracing::debug!("Expected SHA256:   {}", expected);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(RsvcError::ChecksumError(format!(
            "Checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected,
            actual
        )))
    }
}

/// Parses `url_str` and accepts only `http` and `https` (repository managers on a LAN
/// are commonly plain http).
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)
        .map_err(|e| RsvcError::HttpError(format!("Failed to parse URL '{url_str}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RsvcError::HttpError(format!(
            "Invalid URL scheme for '{url_str}': must be http or https, got '{other}'"
        ))),
    }
}
