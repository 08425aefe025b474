//! Deposits into the exchange.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::rest::endpoints::private;
use crate::rest::{CoinbaseRestClient, Method, Param, Params, Transport};
use crate::types::codec;

/// Receipt for a deposit request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Deposit {
    /// Deposit ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Deposited amount.
    #[serde(default, with = "codec::amount::option")]
    pub amount: Option<Decimal>,
    /// Currency code.
    #[serde(default)]
    pub currency: Option<String>,
    /// When the funds become available.
    #[serde(default, with = "codec::timestamp::option")]
    pub payout_at: Option<OffsetDateTime>,
    /// Fee charged.
    #[serde(default, with = "codec::amount::option")]
    pub fee: Option<Decimal>,
    /// Amount before fees.
    #[serde(default, with = "codec::amount::option")]
    pub subtotal: Option<Decimal>,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Deposit funds from a Coinbase account.
    pub async fn deposit_from_coinbase_account(
        &self,
        amount: Decimal,
        coinbase_account_id: &str,
        currency: &str,
        profile_id: Option<&str>,
    ) -> Result<Deposit, CoinbaseError> {
        let body = Params::new()
            .insert("amount", Param::converted(Some(amount), codec::amount_param))
            .insert("coinbase_account_id", coinbase_account_id)
            .insert("currency", currency)
            .insert("profile_id", profile_id)
            .to_body();

        self.dispatch(Method::Post, private::DEPOSIT_COINBASE_ACCOUNT, Some(body))
            .await
    }

    /// Deposit funds from a linked payment method such as a bank account.
    pub async fn deposit_from_payment_method(
        &self,
        amount: Decimal,
        payment_method_id: &str,
        currency: &str,
        profile_id: Option<&str>,
    ) -> Result<Deposit, CoinbaseError> {
        let body = Params::new()
            .insert("amount", Param::converted(Some(amount), codec::amount_param))
            .insert("payment_method_id", payment_method_id)
            .insert("currency", currency)
            .insert("profile_id", profile_id)
            .to_body();

        self.dispatch(Method::Post, private::DEPOSIT_PAYMENT_METHOD, Some(body))
            .await
    }
}
