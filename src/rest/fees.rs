//! Maker and taker fee rates.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::CoinbaseError;
use crate::rest::endpoints::private;
use crate::rest::{CoinbaseRestClient, Method, Transport};
use crate::types::codec;

/// Fee tier of the API key's user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeRates {
    /// Taker fee as a fraction (`0.0060` is 0.6%).
    #[serde(with = "codec::amount")]
    pub taker_fee_rate: Decimal,
    /// Maker fee as a fraction.
    #[serde(with = "codec::amount")]
    pub maker_fee_rate: Decimal,
    /// Trailing 30-day USD volume.
    #[serde(default, with = "codec::amount::option")]
    pub usd_volume: Option<Decimal>,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get the current maker and taker fee rates.
    pub async fn get_fees(&self) -> Result<FeeRates, CoinbaseError> {
        self.dispatch(Method::Get, private::FEES, None).await
    }
}
