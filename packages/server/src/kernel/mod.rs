//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod dynamodb;
pub mod memory_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use dynamodb::DynamoNoteStore;
pub use memory_store::InMemoryNoteStore;
pub use test_dependencies::{FailingNoteStore, TestDependencies};
pub use traits::*;
