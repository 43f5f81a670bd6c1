//! Unit tests for project registration.

pub(crate) mod mocks;
