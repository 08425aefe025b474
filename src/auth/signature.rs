//! HMAC-SHA256 signature generation for Coinbase API authentication.
//!
//! Every request carries a signature computed as:
//! ```text
//! base64(HMAC-SHA256(base64_decode(api_secret), timestamp + METHOD + request_path + body))
//! ```
//!
//! The signature is sent in the `cb-access-sign` header alongside the
//! `cb-access-timestamp` it was computed for.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::CoinbaseError;
use crate::rest::Method;

type HmacSha256 = Hmac<Sha256>;

/// Sign a request for the Coinbase Exchange API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `timestamp` - Decimal seconds string sent in `cb-access-timestamp`
/// * `method` - HTTP verb, rendered as the uppercase token
/// * `request_path` - Path including any query string (e.g., "/orders?limit=10")
/// * `body` - JSON body, or `""` when the request has none
///
/// # Returns
///
/// Base64-encoded HMAC-SHA256 signature.
///
/// # Example
///
/// ```rust
/// use coinbase_exchange_client::auth::{Credentials, sign_request};
/// use coinbase_exchange_client::rest::Method;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "YXBpX3NlY3JldA==", "passphrase");
/// let signature = sign_request(&credentials, "1700000000.000000", Method::Get, "/accounts", "")?;
/// assert_eq!(signature.len(), 44);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    timestamp: &str,
    method: Method,
    request_path: &str,
    body: &str,
) -> Result<String, CoinbaseError> {
    // Decode the API secret from base64.
    let secret_decoded = BASE64
        .decode(credentials.expose_secret())
        .map_err(|_| CoinbaseError::Credential("API secret must be valid base64.".to_string()))?;

    let mut hmac = HmacSha256::new_from_slice(&secret_decoded)
        .map_err(|e| CoinbaseError::Credential(format!("Invalid HMAC key: {e}")))?;
    hmac.update(timestamp.as_bytes());
    hmac.update(method.as_str().as_bytes());
    hmac.update(request_path.as_bytes());
    hmac.update(body.as_bytes());
    let hmac_result = hmac.finalize().into_bytes();

    Ok(BASE64.encode(hmac_result))
}
