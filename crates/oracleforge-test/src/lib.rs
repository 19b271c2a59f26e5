//! Shared test fixtures for OracleForge crates.
//!
//! This crate provides assignment builders and pure checking functions.
//! It does NOT depend on `oracleforge-oracles` to avoid circular dependencies;
//! checks take the oracle call as a closure instead.
//!
//! - [`facts`] - fact and assignment shorthands
//! - [`completions`] - enumeration of total refinements of a partial assignment
//! - [`soundness`] - soundness and totality checks against every completion
//! - [`random`] - seeded random partial assignments
//! - [`files`] - temporary formula files
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! oracleforge-test = { workspace = true }
//! ```

pub mod completions;
pub mod facts;
pub mod files;
pub mod random;
pub mod soundness;

pub use completions::completions;
pub use facts::{assignment, fact, quick_config};
pub use random::RandomAssignment;
pub use soundness::check_soundness;
