//! Stablecoin conversions (for example USD to USDC).

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::CoinbaseError;
use crate::rest::endpoints::{private, segment};
use crate::rest::{CoinbaseRestClient, Method, Param, Params, Transport};
use crate::types::codec;

/// A completed conversion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversion {
    /// Conversion ID.
    pub id: String,
    /// Converted amount.
    #[serde(with = "codec::amount")]
    pub amount: Decimal,
    /// Source account.
    pub from_account_id: String,
    /// Destination account.
    pub to_account_id: String,
    /// Source currency.
    #[serde(rename = "from")]
    pub from_currency: String,
    /// Destination currency.
    #[serde(rename = "to")]
    pub to_currency: String,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Convert `amount` of `from_currency` into `to_currency`.
    ///
    /// `nonce` is an optional caller-supplied idempotency token.
    pub async fn convert_currency(
        &self,
        from_currency: &str,
        to_currency: &str,
        amount: Decimal,
        profile_id: Option<&str>,
        nonce: Option<&str>,
    ) -> Result<Conversion, CoinbaseError> {
        let body = Params::new()
            .insert("from", from_currency)
            .insert("to", to_currency)
            .insert("amount", Param::converted(Some(amount), codec::amount_param))
            .insert("profile_id", profile_id)
            .insert("nonce", nonce)
            .to_body();

        self.dispatch(Method::Post, private::CONVERSIONS, Some(body))
            .await
    }

    /// Get a conversion by ID.
    pub async fn get_conversion(
        &self,
        conversion_id: &str,
        profile_id: Option<&str>,
    ) -> Result<Conversion, CoinbaseError> {
        let path = Params::new()
            .insert("profile_id", profile_id)
            .path_with_query(&format!("{}/{}", private::CONVERSIONS, segment(conversion_id)))?;

        self.dispatch(Method::Get, &path, None).await
    }
}
