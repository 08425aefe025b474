//! Coinbase Exchange REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{Credentials, CredentialsProvider, SystemTimestamp, TimestampProvider, sign_request};
use crate::error::CoinbaseError;
use crate::rest::casing::decamelize_keys;
use crate::rest::classify::classify;
use crate::rest::endpoints::{COINBASE_BASE_URL, COINBASE_SANDBOX_URL};
use crate::rest::transport::{HttpTransport, Method, Transport, TransportRequest};

/// The Coinbase Exchange REST API client.
///
/// Every call builds one request, signs it when credentials are configured,
/// sends it once and decodes the response into the requested type. Nothing is
/// retried and no state is kept between calls.
///
/// # Example
///
/// ```rust,no_run
/// use coinbase_exchange_client::rest::CoinbaseRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Market data only
///     let client = CoinbaseRestClient::builder().build()?;
///
///     let ticker = client.get_product_ticker("BTC-USD").await?;
///     println!("Last price: {}", ticker.price);
///
///     Ok(())
/// }
/// ```
///
/// For account endpoints, provide credentials:
///
/// ```rust,no_run
/// use coinbase_exchange_client::rest::CoinbaseRestClient;
/// use coinbase_exchange_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("key", "c2VjcmV0", "passphrase"));
///     let client = CoinbaseRestClient::builder()
///         .use_sandbox()
///         .credentials(credentials)
///         .build()?;
///
///     for account in client.get_accounts().await? {
///         println!("{}: {}", account.currency, account.balance);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinbaseRestClient<T = HttpTransport> {
    transport: T,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    timestamp_provider: Arc<dyn TimestampProvider>,
}

impl CoinbaseRestClient {
    /// Create a new client builder.
    pub fn builder() -> CoinbaseRestClientBuilder {
        CoinbaseRestClientBuilder::new()
    }
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Check if credentials are configured.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Send a signed request and decode the response into `R`.
    ///
    /// `path` must already carry any query string; it is signed as given.
    /// `body` is sent verbatim and signed as the empty string when absent.
    ///
    /// Exchange rejections come back as [`CoinbaseError::Api`] and are never
    /// decoded. A successful response that does not fit `R` is a
    /// [`CoinbaseError::Decode`].
    pub async fn dispatch<R>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<R, CoinbaseError>
    where
        R: DeserializeOwned,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(CoinbaseError::MissingCredentials)?;

        self.execute(method, path, body, Some(credentials.get_credentials()))
            .await
    }

    /// Like [`dispatch`](Self::dispatch), but sends the request unsigned when
    /// no credentials are configured. Used for market data.
    pub(crate) async fn dispatch_public<R>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<R, CoinbaseError>
    where
        R: DeserializeOwned,
    {
        let credentials = self
            .credentials
            .as_ref()
            .map(|provider| provider.get_credentials());

        self.execute(method, path, body, credentials).await
    }

    async fn execute<R>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        credentials: Option<&Credentials>,
    ) -> Result<R, CoinbaseError>
    where
        R: DeserializeOwned,
    {
        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("content-type".to_string(), "application/json".to_string()),
        ];

        if let Some(credentials) = credentials {
            let timestamp = self.timestamp_provider.timestamp();
            let signature = sign_request(
                credentials,
                &timestamp,
                method,
                path,
                body.as_deref().unwrap_or(""),
            )?;

            headers.push(("cb-access-key".to_string(), credentials.api_key.clone()));
            headers.push((
                "cb-access-passphrase".to_string(),
                credentials.expose_passphrase().to_string(),
            ));
            headers.push(("cb-access-sign".to_string(), signature));
            headers.push(("cb-access-timestamp".to_string(), timestamp));
        }

        let request = TransportRequest {
            method,
            path: path.to_string(),
            headers,
            body,
        };

        tracing::debug!(method = %method, path, "Sending Coinbase request");
        let response = self.transport.send(request).await?;
        tracing::debug!(method = %method, path, status = response.status, "Coinbase response received");

        classify(response.status, &response.body)?;
        decode_body(&response.body)
    }
}

/// Decode a successful response body into `R`.
///
/// An empty body decodes as JSON `null`. Object keys are decamelized before
/// decoding.
pub(crate) fn decode_body<R>(body: &str) -> Result<R, CoinbaseError>
where
    R: DeserializeOwned,
{
    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(body)
            .map_err(|e| CoinbaseError::Decode(format!("response is not valid JSON: {e}")))?
    };

    serde_json::from_value(decamelize_keys(value)).map_err(|e| CoinbaseError::Decode(e.to_string()))
}

impl<T> std::fmt::Debug for CoinbaseRestClient<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseRestClient")
            .field("transport", &self.transport)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`CoinbaseRestClient`].
pub struct CoinbaseRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl CoinbaseRestClientBuilder {
    /// Create a new builder targeting the production API.
    pub fn new() -> Self {
        Self {
            base_url: COINBASE_BASE_URL.to_string(),
            credentials: None,
            timestamp_provider: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Target the public sandbox instead of production.
    pub fn use_sandbox(mut self) -> Self {
        self.base_url = COINBASE_SANDBOX_URL.to_string();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a timeout covering the whole request, body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client over the default HTTP transport.
    pub fn build(self) -> Result<CoinbaseRestClient, CoinbaseError> {
        let transport = HttpTransport::new(&self.base_url, self.user_agent.as_deref(), self.timeout)?;
        Ok(self.build_with_transport(transport))
    }

    /// Build the client over a caller-supplied transport.
    ///
    /// `base_url`, `user_agent` and `timeout` are properties of the HTTP
    /// transport and are ignored here.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> CoinbaseRestClient<T> {
        let timestamp_provider = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(SystemTimestamp::new()));

        CoinbaseRestClient {
            transport,
            credentials: self.credentials,
            timestamp_provider,
        }
    }
}

impl Default for CoinbaseRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::rest::mock::{MockTransport, mock_client, public_client};
    use rust_decimal::Decimal;
    use serde::Deserialize;
    use std::str::FromStr;

    #[derive(Debug, Deserialize)]
    struct Balance {
        id: String,
        #[serde(with = "crate::types::codec::amount")]
        balance: Decimal,
    }

    #[tokio::test]
    async fn test_dispatch_decodes_list() {
        let client = mock_client(MockTransport::with_response(200, r#"[{"id":"1","balance":"10.5"}]"#));

        let balances: Vec<Balance> = client.dispatch(Method::Get, "/accounts", None).await.unwrap();

        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].id, "1");
        assert_eq!(balances[0].balance, Decimal::from_str("10.5").unwrap());
    }

    #[tokio::test]
    async fn test_dispatch_sends_signed_headers() {
        let client = mock_client(MockTransport::with_response(200, "[]"));

        let _: Vec<Value> = client.dispatch(Method::Get, "/accounts", None).await.unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/accounts");
        assert_eq!(request.body, None);
        assert_eq!(request.header("cb-access-key"), Some("test_key"));
        assert_eq!(request.header("cb-access-passphrase"), Some("test_passphrase"));
        assert_eq!(request.header("cb-access-timestamp"), Some("1700000000.000000"));
        // base64(HMAC-SHA256(b"test_secret", "1700000000.000000GET/accounts"))
        assert_eq!(
            request.header("cb-access-sign"),
            Some("lckNMK4JM2m7MBMYuGhOdtfGHtIalJ7T4sfy5JXq1BA=")
        );
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_dispatch_missing_field_is_decode_error() {
        let client = mock_client(MockTransport::with_response(200, r#"[{"id":"1"}]"#));

        let result: Result<Vec<Balance>, _> = client.dispatch(Method::Get, "/accounts", None).await;

        match result {
            Err(CoinbaseError::Decode(message)) => assert!(message.contains("balance")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_error_status_skips_decoding() {
        let client = mock_client(MockTransport::with_response(
            404,
            r#"{"message":"NotFound"}"#,
        ));

        let result: Result<Vec<Balance>, _> = client.dispatch(Method::Get, "/accounts/x", None).await;

        let error = result.unwrap_err();
        let api_error = error.api_error().unwrap();
        assert_eq!(api_error.kind, ApiErrorKind::NotFound);
        assert_eq!(api_error.message, "NotFound");
    }

    #[tokio::test]
    async fn test_dispatch_empty_body_decodes_as_null() {
        let client = mock_client(MockTransport::with_response(200, ""));

        let value: Option<Balance> = client.dispatch(Method::Delete, "/orders", None).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_invalid_json_is_decode_error() {
        let client = mock_client(MockTransport::with_response(200, "<html>"));

        let result: Result<Value, _> = client.dispatch(Method::Get, "/accounts", None).await;
        assert!(matches!(result, Err(CoinbaseError::Decode(_))));
    }

    #[tokio::test]
    async fn test_dispatch_decamelizes_response_keys() {
        #[derive(Deserialize)]
        struct Renamed {
            profile_id: String,
        }

        let client = mock_client(MockTransport::with_response(200, r#"{"profileId":"p1"}"#));

        let renamed: Renamed = client.dispatch(Method::Get, "/profiles/p1", None).await.unwrap();
        assert_eq!(renamed.profile_id, "p1");
    }

    #[tokio::test]
    async fn test_dispatch_requires_credentials() {
        let client = public_client(MockTransport::with_response(200, "[]"));

        let result: Result<Value, _> = client.dispatch(Method::Get, "/accounts", None).await;

        assert!(matches!(result, Err(CoinbaseError::MissingCredentials)));
        assert!(client.transport().last_request().is_none());
    }

    #[tokio::test]
    async fn test_public_dispatch_without_credentials_is_unsigned() {
        let client = public_client(MockTransport::with_response(200, "[]"));

        let _: Value = client.dispatch_public(Method::Get, "/products", None).await.unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.header("cb-access-sign"), None);
        assert_eq!(request.header("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_invalid_secret_fails_before_sending() {
        let client = CoinbaseRestClient::builder()
            .credentials(Arc::new(crate::auth::StaticCredentials::new(
                "key",
                "not base64!",
                "pass",
            )))
            .build_with_transport(MockTransport::with_response(200, "[]"));

        let result: Result<Value, _> = client.dispatch(Method::Get, "/accounts", None).await;

        assert!(matches!(result, Err(CoinbaseError::Credential(_))));
        assert!(client.transport().last_request().is_none());
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let result = CoinbaseRestClient::builder().base_url("::nope").build();
        assert!(matches!(result, Err(CoinbaseError::Url(_))));
    }

    #[test]
    fn test_builder_sandbox_url() {
        let client = CoinbaseRestClient::builder().use_sandbox().build().unwrap();
        assert_eq!(client.transport().base_url().as_str(), "https://api-public.sandbox.exchange.coinbase.com/");
        assert!(!client.has_credentials());
    }
}
