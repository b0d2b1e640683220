//! Helpers shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::client::BaseClient;
use crate::config::ClientOptions;
use crate::transport::{Transport, TransportRequest, TransportResponse, TransportResult};

/// Options every test client starts from
pub fn test_options() -> ClientOptions {
    ClientOptions::new("key-123", "client-id", "1")
        .with_version("cio-test")
        .with_api_token("token")
}

/// Records every request and answers each with the same canned response
#[derive(Debug)]
pub struct SpyTransport {
    requests: Mutex<Vec<TransportRequest>>,
    response: TransportResponse,
}

impl SpyTransport {
    pub fn new(response: TransportResponse) -> Arc<Self> {
        Arc::new(SpyTransport {
            requests: Mutex::new(Vec::new()),
            response,
        })
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<TransportRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for SpyTransport {
    async fn send(&self, request: TransportRequest) -> TransportResult<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

/// A client over a spy answering `200` with `body`
pub fn spy_client(body: Value) -> (BaseClient, Arc<SpyTransport>) {
    spy_client_with(test_options(), TransportResponse::new(200, body.to_string()))
}

pub fn spy_client_with(
    options: ClientOptions,
    response: TransportResponse,
) -> (BaseClient, Arc<SpyTransport>) {
    let spy = SpyTransport::new(response);
    let client = BaseClient::with_transport(options, spy.clone()).unwrap();
    (client, spy)
}

/// Decoded query pairs of a URL, in order
pub fn query_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// All values of `key` in a URL's query, in order
pub fn query_values(url: &Url, key: &str) -> Vec<String> {
    query_pairs(url)
        .into_iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v)
        .collect()
}
