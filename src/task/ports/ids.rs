//! Identifier generation port.

use crate::task::domain::TaskId;

/// Produces a globally unique task identifier per call.
pub trait TaskIdGenerator: Send + Sync {
    /// Returns a fresh identifier.
    fn generate(&self) -> TaskId;
}
