// rsvc-net/src/lib.rs
pub mod http;
pub mod maven;
pub mod validation;

pub use http::{build_http_client, fetch_to_cache};
pub use maven::{MavenBackend, MAVEN_BACKEND_NAME};
pub use validation::{validate_url, verify_checksum};
