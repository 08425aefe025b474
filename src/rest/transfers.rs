//! Deposit and withdrawal history across all accounts.

use crate::error::CoinbaseError;
use crate::rest::accounts::Transfer;
use crate::rest::endpoints::{private, segment};
use crate::rest::{CoinbaseRestClient, Method, Transport};

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get a single deposit or withdrawal.
    pub async fn get_transfer(&self, transfer_id: &str) -> Result<Transfer, CoinbaseError> {
        let path = format!("{}/{}", private::TRANSFERS, segment(transfer_id));
        self.dispatch(Method::Get, &path, None).await
    }

    /// List deposits and withdrawals.
    pub async fn get_transfers(&self) -> Result<Vec<Transfer>, CoinbaseError> {
        self.dispatch(Method::Get, private::TRANSFERS, None).await
    }
}
