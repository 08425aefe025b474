//! Common types used across the Coinbase client library.

pub mod codec;
pub mod common;

pub use common::*;
