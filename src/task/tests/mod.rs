//! Unit tests for task orchestration.
