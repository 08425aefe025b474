//! Error types for the Coinbase client library.

use thiserror::Error;

/// The main error type for all Coinbase client operations.
#[derive(Error, Debug)]
pub enum CoinbaseError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Coinbase API rejected the request
    #[error("Coinbase API error: {0}")]
    Api(ApiError),

    /// The API secret could not be used for signing
    #[error("Credential error: {0}")]
    Credential(String),

    /// A successful response did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A request argument was rejected before sending
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing required credentials
    #[error("Missing credentials: API key, secret and passphrase required")]
    MissingCredentials,
}

impl CoinbaseError {
    /// The API error, if the exchange rejected the request.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CoinbaseError::Api(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ApiError> for CoinbaseError {
    fn from(error: ApiError) -> Self {
        CoinbaseError::Api(error)
    }
}

/// Category of an exchange rejection, derived from the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 400 Bad Request
    InvalidRequest,
    /// 401 Unauthorized
    InvalidCredential,
    /// 403 Forbidden
    AccessDenied,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    ServerError,
    /// Any other non-200 status
    Unclassified,
}

impl ApiErrorKind {
    /// Map an HTTP status code to its error kind.
    ///
    /// Returns `None` for 200, which is the only success status.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200 => None,
            400 => Some(Self::InvalidRequest),
            401 => Some(Self::InvalidCredential),
            403 => Some(Self::AccessDenied),
            404 => Some(Self::NotFound),
            500 => Some(Self::ServerError),
            _ => Some(Self::Unclassified),
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApiErrorKind::InvalidRequest => "invalid request",
            ApiErrorKind::InvalidCredential => "invalid credential",
            ApiErrorKind::AccessDenied => "access denied",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::ServerError => "server error",
            ApiErrorKind::Unclassified => "unclassified",
        };
        write!(f, "{}", s)
    }
}

/// An error reported by the Coinbase API.
///
/// The message is the exchange's `message` field verbatim, or the raw
/// response body when that field is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// HTTP status code of the response
    pub status: u16,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.status, self.message)
    }
}

impl ApiError {
    /// Create a new API error.
    pub fn new(kind: ApiErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// Check if the exchange throttled this request.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Check if the key, passphrase or signature was rejected.
    pub fn is_invalid_credential(&self) -> bool {
        self.kind == ApiErrorKind::InvalidCredential
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}
