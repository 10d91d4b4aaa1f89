// rsvc-common/src/model/mod.rs
pub mod library;
pub mod service_type;

pub use library::{DependencyRecord, LibraryDependency};
pub use service_type::{PeerReservation, ServiceType};
