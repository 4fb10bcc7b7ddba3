//! SQLite storage implementation for Flightline.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `flightline-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for fee rules, overrides, waiver tiers, and
//!   aircraft configuration
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist; `core` is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod aircraft;
pub mod fees;
pub mod waivers;

// Re-export database utilities
pub use db::{create_pool, get_connection, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from flightline-core for convenience
pub use flightline_core::errors::{DatabaseError, Error, Result};
