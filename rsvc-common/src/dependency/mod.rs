// rsvc-common/src/dependency/mod.rs
pub mod resolver;
pub mod set;

pub use resolver::Resolver;
pub use set::UnfulfilledSet;
