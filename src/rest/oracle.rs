//! Signed oracle prices.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::rest::endpoints::private;
use crate::rest::{CoinbaseRestClient, Method, Transport};
use crate::types::codec;

/// Prices signed by Coinbase for use on-chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OraclePrices {
    /// Time of the price snapshot.
    #[serde(with = "codec::timestamp")]
    pub timestamp: OffsetDateTime,
    /// ABI-encoded messages.
    pub messages: Vec<String>,
    /// Signatures over `messages`, in the same order.
    pub signatures: Vec<String>,
    /// Price per currency code.
    #[serde(default)]
    pub prices: BTreeMap<String, Decimal>,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get the latest signed prices.
    pub async fn get_oracle_prices(&self) -> Result<OraclePrices, CoinbaseError> {
        self.dispatch(Method::Get, private::ORACLE, None).await
    }
}
