//! Currency metadata.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::CoinbaseError;
use crate::rest::endpoints::{public, segment};
use crate::rest::{CoinbaseRestClient, Method, Transport};
use crate::types::codec;

/// A currency known to the exchange.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Currency {
    /// Currency code, e.g. `BTC`.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Smallest transferable amount.
    #[serde(with = "codec::amount")]
    pub min_size: Decimal,
    /// `online` or `offline`.
    pub status: String,
    /// Smallest unit of the currency.
    #[serde(with = "codec::amount")]
    pub max_precision: Decimal,
    /// Network and display details.
    #[serde(default)]
    pub details: CurrencyDetails,
    /// Status message, if any.
    #[serde(default)]
    pub message: Option<String>,
    /// Currencies this one can be converted to.
    #[serde(default)]
    pub convertible_to: Option<Vec<String>>,
}

/// Network and display details of a [`Currency`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrencyDetails {
    /// `crypto` or `fiat`.
    #[serde(default, rename = "type")]
    pub currency_type: Option<String>,
    /// Display symbol.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Confirmations required before a deposit is credited.
    #[serde(default)]
    pub network_confirmations: Option<u32>,
    /// Sort position in listings.
    #[serde(default)]
    pub sort_order: Option<u32>,
    /// Address explorer link template.
    #[serde(default)]
    pub crypto_address_link: Option<String>,
    /// Transaction explorer link template.
    #[serde(default)]
    pub crypto_transaction_link: Option<String>,
    /// Supported push payment methods.
    #[serde(default)]
    pub push_payment_methods: Option<Vec<String>>,
    /// Currency groups.
    #[serde(default)]
    pub group_types: Option<Vec<String>>,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Typical processing time.
    #[serde(default, with = "codec::amount::option")]
    pub processing_time_seconds: Option<Decimal>,
    /// Smallest withdrawal.
    #[serde(default, with = "codec::amount::option")]
    pub min_withdrawal_amount: Option<Decimal>,
    /// Largest withdrawal.
    #[serde(default, with = "codec::amount::option")]
    pub max_withdrawal_amount: Option<Decimal>,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get a single currency.
    pub async fn get_currency(&self, currency_id: &str) -> Result<Currency, CoinbaseError> {
        let path = format!("{}/{}", public::CURRENCIES, segment(currency_id));
        self.dispatch_public(Method::Get, &path, None).await
    }

    /// List all known currencies.
    pub async fn get_currencies(&self) -> Result<Vec<Currency>, CoinbaseError> {
        self.dispatch_public(Method::Get, public::CURRENCIES, None)
            .await
    }
}
