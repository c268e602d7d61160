#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the receipt tally system.
///
/// The models in this module are primarily data structures with minimal
/// business logic. Validation happens once, at the DTO boundary, so the
/// rest of the system can assume a well-formed [`models::Receipt`].
pub mod models;

/// Interface traits for the receipt tally system.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
/// These traits define the contract between the domain logic and external
/// adapters (the database, the HTTP server) without specifying
/// implementation details, which keeps the core testable against an
/// in-memory fake and lets infrastructure be swapped without touching the
/// scoring logic.
pub mod ports;

/// The scoring rule engine.
pub mod scoring;

/// Deterministic, content-derived receipt identifiers.
pub mod identity;
