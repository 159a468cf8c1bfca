#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the hts-core crate.
//! [hts_core]: https://docs.rs/hts_core/latest/hts_core/index.html
//! [hts_sqlite]: https://docs.rs/hts_sqlite/latest/hts_sqlite/index.html
//! [hts_axum]: https://docs.rs/hts_axum/latest/hts_axum/index.html
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the health tracking service.
///
/// This module contains the request and response shapes of a paginated list
/// query, together with the small set of identifiers the rest of the system
/// passes around. The models carry minimal logic (parsing and derived
/// metadata) and no knowledge of how documents are stored.
pub mod models;

/// Interface traits for the health tracking service.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external adapters
/// (such as databases or HTTP servers) without specifying implementation details.
pub mod ports;

/// Translation of client list requests into validated store queries and
/// paginated envelopes.
pub mod resolver;

/// An explicit, reflection-free validation schema that reports every failing
/// field at once.
pub mod validation;
