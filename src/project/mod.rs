//! Project registration and source storage.
//!
//! A project is a named bundle of automation source content (playbooks,
//! inventories, roles). Registering a project records its metadata in the
//! project repository and streams its raw content to a storage backend. The
//! module follows hexagonal architecture:
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
pub(crate) mod tests;
