//! Task orchestration for registered projects.
//!
//! A task is a single execution request (for example an `ansible-playbook`
//! run) bound to a previously registered project. Creating a task records it,
//! resolves its project, and hands it to an executor; callers then poll the
//! task for status. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
