//! Adapter implementations for task ports.

pub mod executor;
pub mod memory;

mod ids;

pub use ids::UuidTaskIdGenerator;
