//! Coinbase Exchange REST API endpoint constants.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, PercentEncode, utf8_percent_encode};

/// Base URL for the production Coinbase Exchange REST API.
pub const COINBASE_BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Base URL for the Coinbase Exchange sandbox.
pub const COINBASE_SANDBOX_URL: &str = "https://api-public.sandbox.exchange.coinbase.com";

/// Market data endpoints (no authentication required).
pub mod public {
    /// Trading pairs; `/products/{id}` for one.
    pub const PRODUCTS: &str = "/products";
    /// Currencies; `/currencies/{id}` for one.
    pub const CURRENCIES: &str = "/currencies";
}

/// Account endpoints (authentication required).
pub mod private {
    /// Trading accounts; `/accounts/{id}` for one.
    pub const ACCOUNTS: &str = "/accounts";
    /// Stablecoin conversions.
    pub const CONVERSIONS: &str = "/conversions";
    /// Deposit from a Coinbase account.
    pub const DEPOSIT_COINBASE_ACCOUNT: &str = "/deposits/coinbase-account";
    /// Deposit from a linked payment method.
    pub const DEPOSIT_PAYMENT_METHOD: &str = "/deposits/payment-method";
    /// Current fee rates.
    pub const FEES: &str = "/fees";
    /// Signed oracle prices.
    pub const ORACLE: &str = "/oracle";
    /// Orders; `/orders/{id}` for one.
    pub const ORDERS: &str = "/orders";
    /// Profiles; `/profiles/{id}` for one.
    pub const PROFILES: &str = "/profiles";
    /// Transfer funds between profiles.
    pub const PROFILE_TRANSFER: &str = "/profiles/transfer";
    /// Reports; `/reports/{id}` for one.
    pub const REPORTS: &str = "/reports";
    /// Deposits and withdrawals; `/transfers/{id}` for one.
    pub const TRANSFERS: &str = "/transfers";
    /// Withdraw to a Coinbase account.
    pub const WITHDRAW_COINBASE_ACCOUNT: &str = "/withdrawals/coinbase-account";
    /// Withdraw to a crypto address.
    pub const WITHDRAW_CRYPTO: &str = "/withdrawals/crypto";
    /// Withdraw to a linked payment method.
    pub const WITHDRAW_PAYMENT_METHOD: &str = "/withdrawals/payment-method";
    /// Estimated network fee for a crypto withdrawal.
    pub const WITHDRAW_FEE_ESTIMATE: &str = "/withdrawals/fee-estimate";
}

/// Bytes escaped in an ID path segment: everything but RFC 3986 unreserved
/// characters and `:` (as in `client:<client_oid>`).
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b':');

/// Escape a caller-supplied ID for use as a single path segment.
///
/// The escaped form is what gets signed and what goes on the wire.
pub(crate) fn segment(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, SEGMENT_ENCODE_SET)
}
