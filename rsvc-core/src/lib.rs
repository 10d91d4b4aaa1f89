// rsvc-core/src/lib.rs
pub mod local;
pub mod registry;
pub mod repo;
pub mod sink;

pub use local::LocalBackend;
pub use registry::{BackendFactory, BackendRegistry, SharedRepo};
pub use repo::Repo;
pub use sink::TracingSink;
