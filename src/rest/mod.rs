//! Coinbase Exchange REST API client.
//!
//! [`CoinbaseRestClient`] owns one dispatcher that signs, sends, classifies
//! and decodes requests. The endpoint groups below are thin methods on the
//! client that pick a path, a verb, the parameters and the response type:
//!
//! | Module | Endpoints |
//! |---|---|
//! | [`accounts`] | accounts, holds, ledger, account transfers |
//! | [`conversions`] | stablecoin conversions |
//! | [`currencies`] | currency metadata |
//! | [`deposits`] | deposits from Coinbase accounts and payment methods |
//! | [`fees`] | maker/taker fee rates |
//! | [`oracle`] | signed oracle prices |
//! | [`orders`] | order entry, listing and cancellation |
//! | [`products`] | product metadata and market data |
//! | [`profiles`] | profile management and transfers |
//! | [`reports`] | report generation |
//! | [`transfers`] | deposit and withdrawal history |
//! | [`withdrawals`] | withdrawals and fee estimates |

mod casing;
mod classify;
mod client;
mod endpoints;
mod params;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub mod accounts;
pub mod conversions;
pub mod currencies;
pub mod deposits;
pub mod fees;
pub mod oracle;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod reports;
pub mod transfers;
pub mod withdrawals;

pub use casing::{decamelize, decamelize_keys};
pub use classify::classify;
pub use client::{CoinbaseRestClient, CoinbaseRestClientBuilder};
pub use endpoints::*;
pub use params::{Converter, Param, Params};
pub use transport::{HttpTransport, Method, Transport, TransportRequest, TransportResponse};
