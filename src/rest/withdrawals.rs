//! Withdrawals from the exchange.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::rest::endpoints::private;
use crate::rest::{CoinbaseRestClient, Method, Param, Params, Transport};
use crate::types::codec;

/// Receipt for a withdrawal request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Withdrawal {
    /// Withdrawal ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Withdrawn amount.
    #[serde(default, with = "codec::amount::option")]
    pub amount: Option<Decimal>,
    /// Currency code.
    pub currency: String,
    /// When the funds are paid out.
    #[serde(default, with = "codec::timestamp::option")]
    pub payout_at: Option<OffsetDateTime>,
    /// Fee charged.
    #[serde(default, with = "codec::amount::option")]
    pub fee: Option<Decimal>,
    /// Amount before fees.
    #[serde(default, with = "codec::amount::option")]
    pub subtotal: Option<Decimal>,
}

/// A withdrawal to a crypto address.
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoWithdrawal {
    /// Amount to send.
    pub amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// Destination address.
    pub crypto_address: String,
    /// Destination tag or memo.
    pub destination_tag: Option<String>,
    /// Profile to withdraw from.
    pub profile_id: Option<String>,
    /// Second factor code, when required.
    pub two_factor_code: Option<String>,
    /// Idempotency nonce.
    pub nonce: Option<u64>,
    /// Network fee to pay.
    pub fee: Option<Decimal>,
}

impl CryptoWithdrawal {
    /// Withdraw `amount` of `currency` to `crypto_address`.
    pub fn new(amount: Decimal, currency: impl Into<String>, crypto_address: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            crypto_address: crypto_address.into(),
            destination_tag: None,
            profile_id: None,
            two_factor_code: None,
            nonce: None,
            fee: None,
        }
    }

    /// Set the destination tag or memo.
    pub fn destination_tag(mut self, tag: impl Into<String>) -> Self {
        self.destination_tag = Some(tag.into());
        self
    }

    /// Withdraw from a specific profile.
    pub fn profile_id(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }

    /// Set the second factor code.
    pub fn two_factor_code(mut self, code: impl Into<String>) -> Self {
        self.two_factor_code = Some(code.into());
        self
    }

    /// Set the idempotency nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Set the network fee.
    pub fn fee(mut self, fee: Decimal) -> Self {
        self.fee = Some(fee);
        self
    }

    fn to_params(&self) -> Params {
        Params::new()
            .insert("profile_id", self.profile_id.clone())
            .insert("amount", Param::converted(Some(self.amount), codec::amount_param))
            .insert("currency", self.currency.as_str())
            .insert("crypto_address", self.crypto_address.as_str())
            .insert("destination_tag", self.destination_tag.clone())
            .insert("no_destination_tag", self.destination_tag.is_none())
            .insert("two_factor_code", self.two_factor_code.clone())
            .insert("nonce", self.nonce)
            .insert("fee", Param::converted(self.fee, codec::amount_param))
    }
}

/// Estimated network fee for a crypto withdrawal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeEstimate {
    /// Estimated fee.
    #[serde(with = "codec::amount")]
    pub fee: Decimal,
    /// Fee before any Coinbase subsidy.
    #[serde(default, with = "codec::amount::option")]
    pub fee_before_subsidy: Option<Decimal>,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Withdraw to a Coinbase account.
    pub async fn withdraw_to_coinbase_account(
        &self,
        amount: Decimal,
        coinbase_account_id: &str,
        currency: &str,
        profile_id: Option<&str>,
    ) -> Result<Withdrawal, CoinbaseError> {
        let body = Params::new()
            .insert("profile_id", profile_id)
            .insert("amount", Param::converted(Some(amount), codec::amount_param))
            .insert("coinbase_account_id", coinbase_account_id)
            .insert("currency", currency)
            .to_body();

        self.dispatch(Method::Post, private::WITHDRAW_COINBASE_ACCOUNT, Some(body))
            .await
    }

    /// Withdraw to a crypto address.
    pub async fn withdraw_to_crypto(
        &self,
        withdrawal: &CryptoWithdrawal,
    ) -> Result<Withdrawal, CoinbaseError> {
        let body = withdrawal.to_params().to_body();
        self.dispatch(Method::Post, private::WITHDRAW_CRYPTO, Some(body))
            .await
    }

    /// Withdraw to a linked payment method such as a bank account.
    pub async fn withdraw_to_payment_method(
        &self,
        amount: Decimal,
        payment_method_id: &str,
        currency: &str,
        profile_id: Option<&str>,
    ) -> Result<Withdrawal, CoinbaseError> {
        let body = Params::new()
            .insert("amount", Param::converted(Some(amount), codec::amount_param))
            .insert("payment_method_id", payment_method_id)
            .insert("currency", currency)
            .insert("profile_id", profile_id)
            .to_body();

        self.dispatch(Method::Post, private::WITHDRAW_PAYMENT_METHOD, Some(body))
            .await
    }

    /// Estimate the network fee of a crypto withdrawal.
    pub async fn get_withdrawal_fee_estimate(
        &self,
        currency: Option<&str>,
        crypto_address: Option<&str>,
    ) -> Result<FeeEstimate, CoinbaseError> {
        let path = Params::new()
            .insert("currency", currency)
            .insert("crypto_address", crypto_address)
            .path_with_query(private::WITHDRAW_FEE_ESTIMATE)?;

        self.dispatch(Method::Get, &path, None).await
    }
}
