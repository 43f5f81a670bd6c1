//! Domain model for project registration.
//!
//! Project values and their whitelist validation rules are pure: nothing in
//! this module performs I/O.

mod error;
mod format;
mod name;
mod project;

pub use error::ProjectDomainError;
pub use format::{ProjectFormat, SUPPORTED_EXTENSIONS, StorageKind, ensure_supported_extension};
pub use name::{ProjectName, extract_project_name};
pub use project::Project;
