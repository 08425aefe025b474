//! # Coinbase Exchange Client
//!
//! An async Rust client library for the Coinbase Exchange REST API.
//!
//! ## Features
//!
//! - Typed requests and responses for accounts, orders, products, profiles,
//!   transfers, reports and more
//! - HMAC-SHA256 request signing with the exchange's key, secret and passphrase
//! - Exact amounts with `rust_decimal`, timestamps with `time`
//! - Pluggable transport for testing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coinbase_exchange_client::rest::CoinbaseRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinbaseRestClient::builder().build()?;
//!     let products = client.get_products().await?;
//!     println!("{} products", products.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, ApiErrorKind, CoinbaseError};
pub use rest::{CoinbaseRestClient, Method};
pub use types::common::{OrderType, Side};

/// Result type alias using CoinbaseError
pub type Result<T> = std::result::Result<T, CoinbaseError>;
