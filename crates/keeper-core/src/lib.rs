//! Evaluation core for the Keeper employee-evaluation platform.
//!
//! The crate owns the score computation, response aggregation, and
//! role/assignment visibility rules. Storage and authentication live behind
//! the [`surveys::DirectoryRepository`] trait so the logic stays pure and
//! request-scoped.

pub mod config;
pub mod error;
pub mod surveys;
pub mod telemetry;
