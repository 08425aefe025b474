//! Authentication module for the Coinbase Exchange API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Timestamp generation for request signing
//! - HMAC-SHA256 signature generation for authenticated requests

mod credentials;
mod signature;
mod timestamp;

pub use credentials::{
    API_KEY_VAR, API_PASSPHRASE_VAR, API_SECRET_VAR, Credentials, CredentialsProvider,
    EnvCredentials, StaticCredentials,
};
pub use signature::sign_request;
pub use timestamp::{FixedTimestamp, SystemTimestamp, TimestampProvider};
