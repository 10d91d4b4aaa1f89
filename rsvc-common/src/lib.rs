// rsvc-common/src/lib.rs
pub mod backend;
pub mod catalog;
pub mod config;
pub mod dependency;
pub mod error;
pub mod events;
pub mod fs;
pub mod model;
pub mod status;
pub mod store;

// Re-export key types
pub use backend::{InstallBackend, InstallSession};
pub use catalog::{Catalog, ServiceData};
pub use config::Config;
pub use dependency::{Resolver, UnfulfilledSet};
pub use error::{Result, RsvcError};
pub use events::{InstallEvent, LoggingSink};
pub use model::{DependencyRecord, LibraryDependency, PeerReservation, ServiceType};
pub use status::{Status, StatusLevel};
pub use store::DependencyStore;
