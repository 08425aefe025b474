//! Request timestamps for Coinbase API authentication.
//!
//! Coinbase expects `cb-access-timestamp` as seconds since the UNIX epoch,
//! rendered as a decimal string. The exchange rejects requests whose
//! timestamp drifts more than 30 seconds from its clock.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Trait for providing the timestamp of an authenticated request.
///
/// A fresh value is requested for every call, so the signature is never
/// reused across requests.
pub trait TimestampProvider: Send + Sync {
    /// Current time as decimal seconds since the UNIX epoch.
    fn timestamp(&self) -> String;
}

/// Timestamps from the system clock with microsecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimestamp;

impl SystemTimestamp {
    /// Create a new system clock timestamp provider.
    pub fn new() -> Self {
        Self
    }
}

impl TimestampProvider for SystemTimestamp {
    fn timestamp(&self) -> String {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        format_seconds(elapsed)
    }
}

/// A provider that always returns the same timestamp.
///
/// Useful for reproducing signatures in tests.
#[derive(Debug, Clone)]
pub struct FixedTimestamp(String);

impl FixedTimestamp {
    /// Create a provider returning `timestamp` on every call.
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl TimestampProvider for FixedTimestamp {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

/// Render a duration since the epoch as `"<seconds>.<micros>"`.
fn format_seconds(elapsed: Duration) -> String {
    format!("{}.{:06}", elapsed.as_secs(), elapsed.subsec_micros())
}
