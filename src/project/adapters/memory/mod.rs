//! In-memory project repository.

mod project;

pub use project::InMemoryProjectRepository;
