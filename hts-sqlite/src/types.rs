//! Type definitions for the SQLite implementation.
//!
//! This module contains the strongly-typed identifier and datetime
//! representations used throughout the crate.

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::DocumentId;
