//! Port contracts for task orchestration.
//!
//! Ports define infrastructure-agnostic interfaces used by task services and
//! executors.

pub mod executor;
pub mod ids;
pub mod repository;
pub mod runner;

pub use executor::{Executor, ExecutorError, ExecutorResult};
pub use ids::TaskIdGenerator;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use runner::{TaskRunError, TaskRunResult, TaskRunner};
