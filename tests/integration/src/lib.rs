//! Integration test utilities for the talent messaging service
//!
//! Provides in-memory repository and capability implementations so
//! service flows can be exercised end to end without PostgreSQL or a
//! mail provider.

pub mod fixtures;

pub use fixtures::*;
