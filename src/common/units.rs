//! Unit conversion constants.
//!
//! Bandwidths are in GB/s with decimal gigabytes, data volumes in GB, times
//! are reported in milliseconds and power in watts.

/// Milliseconds per second.
pub const MS_PER_SEC: f64 = 1_000.0;

/// Microseconds per millisecond.
pub const US_PER_MS: f64 = 1_000.0;

/// Nanoseconds per millisecond.
pub const NS_PER_MS: f64 = 1_000_000.0;

/// Bytes per (decimal) gigabyte.
pub const BYTES_PER_GB: f64 = 1e9;

/// Bits per byte.
pub const BITS_PER_BYTE: f64 = 8.0;

/// Joules per picojoule.
pub const J_PER_PJ: f64 = 1e-12;

/// Joules per nanojoule.
pub const J_PER_NJ: f64 = 1e-9;

/// DMIPS per "kilo-DMIPS" scaling step.
pub const DMIPS_PER_KDMIPS: f64 = 1_000.0;

/// Converts seconds to milliseconds.
#[inline]
pub fn secs_to_ms(secs: f64) -> f64 {
    secs * MS_PER_SEC
}

/// Converts a gigabyte volume to bits.
#[inline]
pub fn gb_to_bits(gb: f64) -> f64 {
    gb * BYTES_PER_GB * BITS_PER_BYTE
}
