//! Source storage backends and the registry resolving them by kind.

mod local;
mod memory;
mod registry;

pub use local::LocalSourceStorage;
pub use memory::InMemorySourceStorage;
pub use registry::StorageRegistry;
