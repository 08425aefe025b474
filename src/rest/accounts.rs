//! Trading accounts, holds, ledger and per-account transfers.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::rest::endpoints::{private, segment};
use crate::rest::{CoinbaseRestClient, Method, Transport};
use crate::types::codec;

/// A trading account for one currency within a profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: String,
    /// Currency code.
    pub currency: String,
    /// Total funds.
    #[serde(with = "codec::amount")]
    pub balance: Decimal,
    /// Funds available for trading or withdrawal.
    #[serde(with = "codec::amount")]
    pub available: Decimal,
    /// Funds on hold.
    #[serde(with = "codec::amount")]
    pub hold: Decimal,
    /// Owning profile.
    pub profile_id: String,
    /// Whether trading is enabled.
    pub trading_enabled: bool,
}

/// Funds reserved by an open order or pending withdrawal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hold {
    /// Hold ID.
    pub id: String,
    /// When the hold was placed.
    #[serde(with = "codec::timestamp")]
    pub created_at: OffsetDateTime,
    /// Last change.
    #[serde(default, with = "codec::timestamp::option")]
    pub updated_at: Option<OffsetDateTime>,
    /// Amount held, when reported.
    #[serde(default, with = "codec::amount::option")]
    pub amount: Option<Decimal>,
    /// `order` or `transfer`.
    #[serde(rename = "type")]
    pub hold_type: String,
    /// ID of the order or transfer that created the hold.
    #[serde(rename = "ref")]
    pub reference: String,
}

/// One balance change in an account's ledger.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerEntry {
    /// Entry ID.
    pub id: String,
    /// Change in balance.
    #[serde(with = "codec::amount")]
    pub amount: Decimal,
    /// When the change happened.
    #[serde(with = "codec::timestamp")]
    pub created_at: OffsetDateTime,
    /// Balance after the change.
    #[serde(with = "codec::amount")]
    pub balance: Decimal,
    /// `transfer`, `match`, `fee`, `rebate` or `conversion`.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Type-specific details such as `order_id` and `trade_id`.
    #[serde(default)]
    pub details: Value,
}

/// A deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transfer {
    /// Transfer ID.
    pub id: String,
    /// `deposit`, `withdraw`, `internal_deposit` or `internal_withdraw`.
    #[serde(rename = "type")]
    pub transfer_type: String,
    /// Creation time.
    #[serde(with = "codec::timestamp")]
    pub created_at: OffsetDateTime,
    /// Completion time.
    #[serde(default, with = "codec::timestamp::option")]
    pub completed_at: Option<OffsetDateTime>,
    /// Cancellation time.
    #[serde(default, with = "codec::timestamp::option")]
    pub canceled_at: Option<OffsetDateTime>,
    /// Processing time.
    #[serde(default, with = "codec::timestamp::option")]
    pub processed_at: Option<OffsetDateTime>,
    /// Transferred amount.
    #[serde(with = "codec::amount")]
    pub amount: Decimal,
    /// Destination and network details.
    #[serde(default)]
    pub details: Value,
    /// Caller-supplied nonce, if any.
    #[serde(default, with = "codec::amount::option")]
    pub user_nonce: Option<Decimal>,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get a single trading account.
    pub async fn get_account(&self, account_id: &str) -> Result<Account, CoinbaseError> {
        let path = format!("{}/{}", private::ACCOUNTS, segment(account_id));
        self.dispatch(Method::Get, &path, None).await
    }

    /// List all trading accounts of the API key's profile.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinbase_exchange_client::rest::CoinbaseRestClient;
    /// use coinbase_exchange_client::auth::EnvCredentials;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = EnvCredentials::try_from_env().ok_or("missing credentials")?;
    ///     let client = CoinbaseRestClient::builder()
    ///         .credentials(Arc::new(credentials))
    ///         .build()?;
    ///
    ///     for account in client.get_accounts().await? {
    ///         println!("{}: {} available", account.currency, account.available);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_accounts(&self) -> Result<Vec<Account>, CoinbaseError> {
        self.dispatch(Method::Get, private::ACCOUNTS, None).await
    }

    /// List holds on an account.
    pub async fn get_account_holds(&self, account_id: &str) -> Result<Vec<Hold>, CoinbaseError> {
        let path = format!("{}/{}/holds", private::ACCOUNTS, segment(account_id));
        self.dispatch(Method::Get, &path, None).await
    }

    /// List ledger activity on an account, newest first.
    pub async fn get_account_ledger(
        &self,
        account_id: &str,
    ) -> Result<Vec<LedgerEntry>, CoinbaseError> {
        let path = format!("{}/{}/ledger", private::ACCOUNTS, segment(account_id));
        self.dispatch(Method::Get, &path, None).await
    }

    /// List deposits and withdrawals on an account.
    pub async fn get_account_transfers(
        &self,
        account_id: &str,
    ) -> Result<Vec<Transfer>, CoinbaseError> {
        let path = format!("{}/{}/transfers", private::ACCOUNTS, segment(account_id));
        self.dispatch(Method::Get, &path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::mock::{MockTransport, mock_client};
    use std::str::FromStr;
    use time::macros::datetime;

    #[tokio::test]
    async fn test_get_accounts() {
        let body = r#"[{
            "id": "1",
            "currency": "BTC",
            "balance": "10.5",
            "available": "10.5",
            "hold": "0.0000000000",
            "profile_id": "p",
            "trading_enabled": true
        }]"#;
        let client = mock_client(MockTransport::with_response(200, body));

        let accounts = client.get_accounts().await.unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, "1");
        assert_eq!(accounts[0].balance, Decimal::from_str("10.5").unwrap());
        assert_eq!(accounts[0].hold.to_string(), "0.0000000000");
        assert!(accounts[0].trading_enabled);

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/accounts");
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_get_account_holds() {
        let body = r#"[{
            "id": "h1",
            "created_at": "2019-11-21 15:44:12.345678+00",
            "updated_at": "2019-11-21T15:44:13Z",
            "amount": "4.23",
            "type": "order",
            "ref": "o1"
        }]"#;
        let client = mock_client(MockTransport::with_response(200, body));

        let holds = client.get_account_holds("a1").await.unwrap();

        assert_eq!(holds[0].hold_type, "order");
        assert_eq!(holds[0].reference, "o1");
        assert_eq!(holds[0].created_at, datetime!(2019-11-21 15:44:12.345678 UTC));
        assert_eq!(client.transport().last_request().unwrap().path, "/accounts/a1/holds");
    }

    #[tokio::test]
    async fn test_get_account_ledger() {
        let body = r#"[{
            "id": "100",
            "amount": "-0.001",
            "created_at": "2021-03-01T12:00:00.000Z",
            "balance": "1.999",
            "type": "fee",
            "details": {"order_id": "o1", "product_id": "BTC-USD", "trade_id": "74"}
        }]"#;
        let client = mock_client(MockTransport::with_response(200, body));

        let ledger = client.get_account_ledger("a1").await.unwrap();

        assert_eq!(ledger[0].amount, Decimal::from_str("-0.001").unwrap());
        assert_eq!(ledger[0].entry_type, "fee");
        assert_eq!(ledger[0].details["product_id"], "BTC-USD");
        assert_eq!(client.transport().last_request().unwrap().path, "/accounts/a1/ledger");
    }

    #[tokio::test]
    async fn test_get_account_transfers_with_missing_times() {
        let body = r#"[{
            "id": "t1",
            "type": "deposit",
            "created_at": "2021-03-01T12:00:00Z",
            "completed_at": null,
            "amount": "100.00",
            "details": {},
            "user_nonce": null
        }]"#;
        let client = mock_client(MockTransport::with_response(200, body));

        let transfers = client.get_account_transfers("a1").await.unwrap();

        assert_eq!(transfers[0].transfer_type, "deposit");
        assert!(transfers[0].completed_at.is_none());
        assert!(transfers[0].canceled_at.is_none());
        assert!(transfers[0].user_nonce.is_none());
    }
}
