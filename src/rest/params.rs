//! Request parameter building.
//!
//! [`Params`] collects named parameters, drops the ones without a value,
//! decamelizes their names and renders them either as a JSON body or as a
//! query string.
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use coinbase_exchange_client::rest::{Param, Params};
//! use coinbase_exchange_client::types::codec;
//!
//! let price: Option<Decimal> = Some("100.50".parse().unwrap());
//! let funds: Option<Decimal> = None;
//!
//! let body = Params::new()
//!     .insert("productId", "BTC-USD")
//!     .insert("price", Param::converted(price, codec::amount_param))
//!     .insert("funds", Param::converted(funds, codec::amount_param))
//!     .to_body();
//!
//! assert_eq!(body, r#"{"product_id":"BTC-USD","price":"100.50"}"#);
//! ```

use serde_json::Value;

use crate::error::CoinbaseError;
use crate::rest::casing::{decamelize, decamelize_keys};

/// Converts a present parameter value into its wire form.
pub type Converter<T> = fn(&T) -> Value;

/// A single request parameter: either absent or a wire-ready value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// No value; the key is omitted from the request entirely.
    Absent,
    /// A value to send.
    Present(Value),
}

impl Param {
    /// Wrap an optional value, applying `converter` only when it is present.
    pub fn converted<T>(value: Option<T>, converter: Converter<T>) -> Self {
        match value {
            Some(value) => Param::Present(converter(&value)),
            None => Param::Absent,
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Param::Present(value.into()),
            None => Param::Absent,
        }
    }
}

macro_rules! present_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Param::Present(value.into())
                }
            }
        )*
    };
}

present_from!(bool, i32, i64, u32, u64, String, &str, Vec<String>, Value);

/// An ordered collection of request parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Absent values are skipped.
    ///
    /// The name may be camelCase, PascalCase or snake_case; it is sent as
    /// snake_case. Nested object keys are converted too. Inserting a name
    /// twice keeps the position of the first insert and the last value.
    pub fn insert(mut self, name: &str, value: impl Into<Param>) -> Self {
        if let Param::Present(value) = value.into() {
            let key = decamelize(name);
            let value = decamelize_keys(value);
            match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => self.entries.push((key, value)),
            }
        }
        self
    }

    /// Check if no parameter has a value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a compact JSON object in insertion order. An empty set renders as `{}`.
    pub fn to_body(&self) -> String {
        let fields: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("{}:{}", Value::String(key.clone()), value))
            .collect();
        format!("{{{}}}", fields.join(","))
    }

    /// Render as a URL query string.
    ///
    /// Arrays become repeated keys (`status=open&status=pending`); strings are
    /// sent bare and other scalars through their JSON text.
    pub fn to_query(&self) -> Result<String, CoinbaseError> {
        let mut pairs: Vec<(&str, String)> = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                Value::Array(items) => {
                    for item in items {
                        pairs.push((key.as_str(), query_scalar(key, item)?));
                    }
                }
                other => pairs.push((key.as_str(), query_scalar(key, other)?)),
            }
        }
        serde_urlencoded::to_string(&pairs)
            .map_err(|e| CoinbaseError::InvalidParameter(e.to_string()))
    }

    /// Append the query string to `path`, leaving it alone when there are no parameters.
    pub fn path_with_query(&self, path: &str) -> Result<String, CoinbaseError> {
        if self.is_empty() {
            return Ok(path.to_string());
        }
        Ok(format!("{}?{}", path, self.to_query()?))
    }
}

fn query_scalar(key: &str, value: &Value) -> Result<String, CoinbaseError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        _ => Err(CoinbaseError::InvalidParameter(format!(
            "{key} cannot be sent as a query parameter"
        ))),
    }
}
