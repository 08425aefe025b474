//! Conversions between Coinbase wire scalars and domain types.
//!
//! Coinbase sends amounts as decimal strings (`"12.34500000"`) and timestamps
//! as ISO-8601 strings (`"2021-09-27T17:28:01.456Z"`). Endpoints that take a
//! timestamp back expect integer milliseconds since the epoch instead, so the
//! two directions are handled separately.
//!
//! The serde adapters in this module are meant for `#[serde(with = ...)]`:
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use serde::Deserialize;
//! use time::OffsetDateTime;
//! use coinbase_exchange_client::types::codec;
//!
//! #[derive(Deserialize)]
//! struct Fill {
//!     #[serde(with = "codec::amount")]
//!     price: Decimal,
//!     #[serde(with = "codec::timestamp")]
//!     created_at: OffsetDateTime,
//! }
//!
//! let json = r#"{"price":"12.34500000","created_at":"2021-09-27T17:28:01.456Z"}"#;
//! let fill: Fill = serde_json::from_str(json).unwrap();
//! assert_eq!(fill.price.to_string(), "12.34500000");
//! assert_eq!(codec::timestamp_millis(&fill.created_at), 1632763681456);
//! ```

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use thiserror::Error;
use time::{OffsetDateTime, UtcOffset};
use time::format_description::well_known::{Iso8601, Rfc3339};

use crate::error::CoinbaseError;

/// A wire scalar that could not be converted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Not a decimal amount
    #[error("invalid amount {0:?}")]
    Amount(String),
    /// Not a recognised timestamp
    #[error("invalid timestamp {0:?}")]
    Timestamp(String),
    /// A timestamp the outbound wire format cannot express
    #[error("timestamp {0} has no RFC 3339 form")]
    Unrepresentable(String),
}

impl From<CodecError> for CoinbaseError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::Unrepresentable(_) => CoinbaseError::InvalidParameter(error.to_string()),
            _ => CoinbaseError::Decode(error.to_string()),
        }
    }
}

/// Parse a decimal amount without going through a float.
pub fn parse_amount(s: &str) -> Result<Decimal, CodecError> {
    let trimmed = s.trim();
    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str_exact(trimmed)
    };
    parsed.map_err(|_| CodecError::Amount(s.to_string()))
}

/// Render an amount in its canonical string form, keeping its scale.
pub fn format_amount(amount: &Decimal) -> String {
    amount.to_string()
}

/// Parse an exchange timestamp.
///
/// Accepts RFC 3339 / ISO-8601 with optional fractional seconds, the legacy
/// `"2019-11-21 15:44:12.345678+00"` form, and epoch seconds such as
/// `"1600000000.123"`. A missing offset is read as UTC.
pub fn parse_timestamp(s: &str) -> Result<OffsetDateTime, CodecError> {
    let trimmed = s.trim();
    if is_epoch_seconds(trimmed) {
        return parse_epoch_seconds(trimmed).ok_or_else(|| CodecError::Timestamp(s.to_string()));
    }
    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(parsed);
    }
    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Iso8601::DEFAULT) {
        return Ok(parsed);
    }
    OffsetDateTime::parse(&normalize_legacy(trimmed), &Rfc3339)
        .map_err(|_| CodecError::Timestamp(s.to_string()))
}

/// Milliseconds since the epoch, the form write endpoints expect.
pub fn timestamp_millis(timestamp: &OffsetDateTime) -> i64 {
    (timestamp.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Parameter converter: amount as a decimal string.
pub fn amount_param(amount: &Decimal) -> Value {
    Value::String(format_amount(amount))
}

/// Parameter converter: timestamp as integer milliseconds.
pub fn timestamp_param(timestamp: &OffsetDateTime) -> Value {
    Value::from(timestamp_millis(timestamp))
}

/// Timestamp as a UTC RFC 3339 string, used for query filters.
///
/// Fails for dates outside years 0000 to 9999, which the format cannot
/// express. Unlike the other converters this one is fallible, so callers
/// apply it before inserting the value.
pub fn rfc3339_param(timestamp: &OffsetDateTime) -> Result<Value, CodecError> {
    let unrepresentable = || CodecError::Unrepresentable(timestamp.to_string());
    timestamp
        .checked_to_offset(UtcOffset::UTC)
        .ok_or_else(unrepresentable)?
        .format(&Rfc3339)
        .map(Value::String)
        .map_err(|_| unrepresentable())
}

/// Parameter converter: any value through its `Display` impl.
pub fn display_param<T: Display>(value: &T) -> Value {
    Value::String(value.to_string())
}

// Shorter digit runs ("2021") are years or garbage, not epoch seconds.
const MIN_EPOCH_DIGITS: usize = 9;

fn is_epoch_seconds(s: &str) -> bool {
    let integer = s.split_once('.').map_or(s, |(secs, _)| secs);
    integer.len() >= MIN_EPOCH_DIGITS
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.matches('.').count() <= 1
}

fn parse_epoch_seconds(s: &str) -> Option<OffsetDateTime> {
    let (secs, fraction) = s.split_once('.').unwrap_or((s, ""));
    let secs: i128 = secs.parse().ok()?;
    let mut digits: String = fraction.chars().take(9).collect();
    while digits.len() < 9 {
        digits.push('0');
    }
    let nanos: i128 = digits.parse().ok()?;
    let total = secs.checked_mul(1_000_000_000)?.checked_add(nanos)?;
    OffsetDateTime::from_unix_timestamp_nanos(total).ok()
}

// "2019-11-21 15:44:12.345678+00" -> "2019-11-21T15:44:12.345678+00:00"
fn normalize_legacy(s: &str) -> String {
    let mut out = s.replacen(' ', "T", 1);
    let time_start = out.find('T').map(|i| i + 1).unwrap_or(out.len());
    let offset_at = out[time_start..]
        .rfind(|c: char| c == '+' || c == '-')
        .map(|pos| time_start + pos + 1);
    match offset_at {
        Some(start) => {
            let offset_len = out.len() - start;
            if offset_len == 2 {
                out.push_str(":00");
            } else if offset_len == 4 && !out[start..].contains(':') {
                out.insert(start + 2, ':');
            }
        }
        None if !out.ends_with(['Z', 'z']) => out.push('Z'),
        None => {}
    }
    out
}

/// Read a scalar leaf as text. Numbers keep their exact textual form.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// Serde adapter for `Decimal` amounts sent as strings.
pub mod amount {
    use super::*;
    use serde::Serializer;

    /// Serialize an amount as its canonical string.
    pub fn serialize<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_amount(amount))
    }

    /// Deserialize an amount from a decimal string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = scalar_text(deserializer)?
            .ok_or_else(|| de::Error::custom("expected an amount, found null"))?;
        parse_amount(&text).map_err(de::Error::custom)
    }

    /// Adapter for `Option<Decimal>`; pair with `#[serde(default)]`.
    pub mod option {
        use super::*;

        /// Serialize an optional amount.
        pub fn serialize<S>(amount: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match amount {
                Some(amount) => super::serialize(amount, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional amount; `null` becomes `None`.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
        where
            D: Deserializer<'de>,
        {
            scalar_text(deserializer)?
                .map(|text| parse_amount(&text).map_err(de::Error::custom))
                .transpose()
        }
    }
}

/// Serde adapter for timestamps: ISO-8601 in, integer milliseconds out.
pub mod timestamp {
    use super::*;
    use serde::Serializer;

    /// Serialize a timestamp as milliseconds since the epoch.
    pub fn serialize<S>(timestamp: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(timestamp_millis(timestamp))
    }

    /// Deserialize a timestamp from an exchange string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = scalar_text(deserializer)?
            .ok_or_else(|| de::Error::custom("expected a timestamp, found null"))?;
        parse_timestamp(&text).map_err(de::Error::custom)
    }

    /// Adapter for `Option<OffsetDateTime>`; pair with `#[serde(default)]`.
    pub mod option {
        use super::*;

        /// Serialize an optional timestamp.
        pub fn serialize<S>(
            timestamp: &Option<OffsetDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match timestamp {
                Some(timestamp) => super::serialize(timestamp, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional timestamp; `null` becomes `None`.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            scalar_text(deserializer)?
                .map(|text| parse_timestamp(&text).map_err(de::Error::custom))
                .transpose()
        }
    }
}
