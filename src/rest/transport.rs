//! HTTP transport seam.
//!
//! The dispatcher hands a fully signed [`TransportRequest`] to a [`Transport`]
//! and gets back the status code and the complete body text. The default
//! [`HttpTransport`] is backed by `reqwest` with tracing middleware; tests can
//! swap in their own implementation through
//! [`CoinbaseRestClientBuilder::build_with_transport`](crate::rest::CoinbaseRestClientBuilder::build_with_transport).

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use url::{Position, Url};

use crate::error::CoinbaseError;

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// The uppercase verb, as it appears in the signed message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether parameters for this verb travel in the query string.
    pub fn uses_query(&self) -> bool {
        matches!(self, Method::Get | Method::Delete)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A signed request ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP verb
    pub method: Method,
    /// Request path including any query string, relative to the base URL
    pub path: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<String>,
}

impl TransportRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The raw outcome of a request: status code and full body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, read in full
    pub body: String,
}

/// Sends signed requests and returns raw responses.
///
/// Network failures are returned as errors; any HTTP status, including error
/// statuses, is a successful [`TransportResponse`].
pub trait Transport: Send + Sync {
    /// Send one request.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, CoinbaseError>> + Send;
}

/// Default transport over `reqwest` with tracing middleware.
#[derive(Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for `base_url`.
    pub fn new(
        base_url: &str,
        user_agent: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, CoinbaseError> {
        let base_url = Url::parse(base_url)?;

        let mut headers = HeaderMap::new();
        let user_agent = user_agent
            .map(str::to_string)
            .unwrap_or_else(|| format!("coinbase-exchange-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coinbase-exchange-client"));
        headers.insert(USER_AGENT, header_value);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let reqwest_client = builder.build()?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join `path` onto the base URL.
    ///
    /// The request is signed over `path`, so URL normalization must not
    /// change it: paths with unescaped characters or dot segments are
    /// rejected rather than sent under a signature that cannot match.
    fn url_for(&self, path: &str) -> Result<Url, CoinbaseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{}{}", base, path))?;

        let base_path = self.base_url.path().trim_end_matches('/');
        let sent = &url[Position::BeforePath..Position::AfterQuery];
        if sent.strip_prefix(base_path) != Some(path) {
            return Err(CoinbaseError::InvalidParameter(format!(
                "path {path:?} is not in canonical URL form"
            )));
        }
        Ok(url)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, CoinbaseError> {
        let url = self.url_for(&request.path)?;
        let headers = header_map(&request.headers)?;

        let mut builder = self
            .http_client
            .request(request.method.into(), url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, CoinbaseError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| CoinbaseError::InvalidParameter(format!("invalid header name: {name}")))?;
        // Values are credentials; keep them out of the error text.
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            CoinbaseError::InvalidParameter(format!("invalid value for header {name}"))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_verbs() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
        assert!(Method::Get.uses_query());
        assert!(Method::Delete.uses_query());
        assert!(!Method::Put.uses_query());
    }

    #[test]
    fn test_url_for_keeps_base_path_and_query() {
        let transport = HttpTransport::new("http://localhost:8080/api/", None, None).unwrap();
        let url = transport.url_for("/orders?status=open").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/orders?status=open");
    }

    #[test]
    fn test_url_for_keeps_escaped_path() {
        let transport = HttpTransport::new("http://localhost:8080", None, None).unwrap();
        let url = transport.url_for("/orders/client:my%20order").unwrap();
        assert_eq!(url.path(), "/orders/client:my%20order");
    }

    #[test]
    fn test_url_for_rejects_paths_the_url_would_rewrite() {
        let transport = HttpTransport::new("http://localhost:8080/api", None, None).unwrap();
        for path in ["/orders/client:my order", "/accounts/../fees", "/orders/a#b", "/products/caf\u{e9}"] {
            let result = transport.url_for(path);
            assert!(
                matches!(result, Err(CoinbaseError::InvalidParameter(_))),
                "{path} was accepted"
            );
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpTransport::new("not a url", None, None);
        assert!(matches!(result, Err(CoinbaseError::Url(_))));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = TransportRequest {
            method: Method::Get,
            path: "/accounts".to_string(),
            headers: vec![("CB-ACCESS-KEY".to_string(), "key".to_string())],
            body: None,
        };
        assert_eq!(request.header("cb-access-key"), Some("key"));
        assert_eq!(request.header("cb-access-sign"), None);
    }

    #[test]
    fn test_header_map_rejects_control_characters() {
        let headers = vec![("cb-access-passphrase".to_string(), "bad\nvalue".to_string())];
        let result = header_map(&headers);
        match result {
            Err(CoinbaseError::InvalidParameter(message)) => {
                assert!(!message.contains("bad"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
