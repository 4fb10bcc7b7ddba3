/// Decimal precision for displayed fee amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Time-to-live for lookup caches (aircraft display names), in seconds
pub const LOOKUP_CACHE_TTL_SECS: u64 = 300;
