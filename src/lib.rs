//! Playbook Deck: project storage and task orchestration for automation
//! runs.
//!
//! Clients upload automation projects (playbooks and their supporting files)
//! and later enqueue tasks that run an automation command, such as
//! `ansible-playbook`, against a stored project.
//!
//! # Architecture
//!
//! Playbook Deck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, filesystem,
//!   processes)
//!
//! # Modules
//!
//! - [`project`]: Project registration and source storage
//! - [`task`]: Task recording, project binding, and dispatch
//! - [`app`]: Service wiring from [`config`]
//! - [`error`]: Error classification for outer layers

pub mod app;
pub mod config;
pub mod error;
pub mod project;
pub mod task;
pub mod telemetry;
