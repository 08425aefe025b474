//! In-process transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::auth::{FixedTimestamp, StaticCredentials};
use crate::error::CoinbaseError;
use crate::rest::CoinbaseRestClient;
use crate::rest::transport::{Transport, TransportRequest, TransportResponse};

/// Replays canned responses and records every request it is given.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub(crate) fn with_response(status: u16, body: &str) -> Self {
        let transport = Self::default();
        transport.push_response(status, body);
        transport
    }

    pub(crate) fn push_response(&self, status: u16, body: &str) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(TransportResponse {
                status,
                body: body.to_string(),
            });
        }
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub(crate) fn last_request(&self) -> Option<TransportRequest> {
        self.requests().pop()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, CoinbaseError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front());
        // An unscripted call is answered like an unknown route.
        Ok(response.unwrap_or(TransportResponse {
            status: 404,
            body: r#"{"message":"no scripted response"}"#.to_string(),
        }))
    }
}

/// Client with fixed credentials (`base64("test_secret")`) and timestamp.
pub(crate) fn mock_client(transport: MockTransport) -> CoinbaseRestClient<MockTransport> {
    CoinbaseRestClient::builder()
        .credentials(Arc::new(StaticCredentials::new(
            "test_key",
            "dGVzdF9zZWNyZXQ=",
            "test_passphrase",
        )))
        .timestamp_provider(Arc::new(FixedTimestamp::new("1700000000.000000")))
        .build_with_transport(transport)
}

/// Client without credentials.
pub(crate) fn public_client(transport: MockTransport) -> CoinbaseRestClient<MockTransport> {
    CoinbaseRestClient::builder().build_with_transport(transport)
}
