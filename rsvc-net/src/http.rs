// rsvc-net/src/http.rs
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use rsvc_common::error::{Result, RsvcError};
use tracing::{debug, error, warn};

use crate::validation::{validate_url, verify_checksum};

const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
const CONNECT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT_STRING: &str = concat!("rsvc/", env!("CARGO_PKG_VERSION"), " (Rust)");

pub fn build_http_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| RsvcError::HttpError(format!("Failed to build HTTP client: {e}")))
}

/// Returns `cache_path`, downloading `url` into it first unless a cached copy
/// already passes the checksum. An empty `sha256_expected` skips verification.
pub fn fetch_to_cache(
    client: &Client,
    url: &str,
    cache_path: &Path,
    sha256_expected: &str,
) -> Result<PathBuf> {
    if cache_path.is_file() {
        if sha256_expected.is_empty() {
            debug!("Using cached file (no checksum provided): {}", cache_path.display());
            return Ok(cache_path.to_path_buf());
        }
        match verify_checksum(cache_path, sha256_expected) {
            Ok(()) => {
                debug!("Using valid cached file: {}", cache_path.display());
                return Ok(cache_path.to_path_buf());
            }
            Err(e) => {
                debug!(
                    "Cached file checksum mismatch ({}): {}. Redownloading.",
                    cache_path.display(),
                    e
                );
                if let Err(remove_err) = fs::remove_file(cache_path) {
                    debug!(
                        "Failed to remove corrupted cached file {}: {}",
                        cache_path.display(),
                        remove_err
                    );
                }
            }
        }
    }

    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            RsvcError::IoError(format!(
                "Failed to create cache directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    validate_url(url)?;
    download_and_verify(client, url, cache_path, sha256_expected)
}

fn download_and_verify(
    client: &Client,
    url: &str,
    final_path: &Path,
    sha256_expected: &str,
) -> Result<PathBuf> {
    let file_name = final_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let temp_path = final_path.with_file_name(format!(".{file_name}.download"));
    debug!("Downloading {} to {}", url, temp_path.display());
    if temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            warn!(
                "Could not remove existing temporary file {}: {}",
                temp_path.display(),
                e
            );
        }
    }

    let mut response = client.get(url).send().map_err(|e| {
        debug!("HTTP request failed for {url}: {e}");
        RsvcError::HttpError(format!("HTTP request failed for {url}: {e}"))
    })?;
    let status = response.status();
    debug!("Received HTTP status: {} for {}", status, url);

    if !status.is_success() {
        error!("HTTP error {} for URL {}", status, url);
        return Err(match status {
            StatusCode::NOT_FOUND => RsvcError::DownloadError(
                file_name,
                url.to_string(),
                "Resource not found (404)".to_string(),
            ),
            StatusCode::FORBIDDEN => RsvcError::DownloadError(
                file_name,
                url.to_string(),
                "Access forbidden (403)".to_string(),
            ),
            _ => RsvcError::HttpError(format!("HTTP error {status} for URL {url}")),
        });
    }

    let mut temp_file = File::create(&temp_path).map_err(|e| {
        RsvcError::IoError(format!(
            "Failed to create temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;
    io::copy(&mut response, &mut temp_file).map_err(|e| {
        RsvcError::IoError(format!(
            "Failed to write download stream to {}: {}",
            temp_path.display(),
            e
        ))
    })?;
    drop(temp_file);

    if sha256_expected.is_empty() {
        debug!("No checksum for {}, skipping verification", file_name);
    } else if let Err(e) = verify_checksum(&temp_path, sha256_expected) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, final_path).map_err(|e| {
        RsvcError::IoError(format!(
            "Failed to move temp file {} to {}: {}",
            temp_path.display(),
            final_path.display(),
            e
        ))
    })?;
    debug!("Moved verified file to {}", final_path.display());
    Ok(final_path.to_path_buf())
}
