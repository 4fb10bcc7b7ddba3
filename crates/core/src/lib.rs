//! Flightline Core - Domain entities, services, and traits.
//!
//! This crate contains the fee resolution and waiver engine for a ground
//! handling operation. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod aircraft;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod schedule;
pub mod utils;
pub mod waivers;

// Re-export common types from the fee and schedule modules
pub use fees::*;
pub use schedule::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
