//! UUID-backed task identifier generator.

use crate::task::{domain::TaskId, ports::TaskIdGenerator};
use uuid::Uuid;

/// Generates random UUID v4 task identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTaskIdGenerator;

impl TaskIdGenerator for UuidTaskIdGenerator {
    fn generate(&self) -> TaskId {
        TaskId::from_uuid(Uuid::new_v4())
    }
}
