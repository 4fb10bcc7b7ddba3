//! Shared utilities.

mod lookup_cache;

pub use lookup_cache::{Clock, LookupCache, SystemClock};
