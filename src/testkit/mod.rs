//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for identities and amounts.
//! - [`harness`] - A factory wired to a manual clock and an in-memory
//!   treasury, with helpers for funding traders and opening markets.

pub mod domain;
pub mod harness;
