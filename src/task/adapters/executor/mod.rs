//! Executor and runner adapters.

mod process;
mod queued;

pub use process::ProcessTaskRunner;
pub use queued::{QueueSettings, QueuedExecutor};
