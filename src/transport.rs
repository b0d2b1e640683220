//! The HTTP seam.
//!
//! Every call goes through a [`Transport`]. [`ReqwestTransport`] is used by
//! default; tests and embedders may supply their own implementation through
//! [`BaseClient::with_transport`](crate::client::BaseClient::with_transport).

use std::error::Error;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use url::Url;

use crate::request::RequestType;

pub type TransportResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// A fully built outbound request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestType,
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        TransportResponse {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn send(&self, request: TransportRequest) -> TransportResult<TransportResponse>;
}

/// Transport backed by a shared [`reqwest::Client`]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .connect_timeout(Duration::from_secs(60))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(ReqwestTransport { client })
    }

    /// Wraps an already configured client
    pub fn from_client(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> TransportResult<TransportResponse> {
        let builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        let response = request.body.to_request(builder)?.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn test_response_is_ok_only_for_2xx() {
        assert!(TransportResponse::new(200, "").is_ok());
        assert!(TransportResponse::new(204, "").is_ok());
        assert!(!TransportResponse::new(301, "").is_ok());
        assert!(!TransportResponse::new(404, "").is_ok());
    }

    #[test]
    fn test_response_json() {
        let response = TransportResponse::new(200, r#"{"result_id": "abc"}"#);
        let body: Value = response.json().unwrap();
        assert_eq!(body["result_id"], "abc");
        assert!(TransportResponse::new(200, "<html>").json::<Value>().is_err());
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_headers_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/item")
                    .header("authorization", "Basic dG9rZW46")
                    .json_body(json!({"id": "1"}));
                then.status(200).body("{}");
            })
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic dG9rZW46".parse().unwrap());

        let request = TransportRequest {
            method: Method::POST,
            url: Url::parse(&server.url("/v1/item")).unwrap(),
            headers,
            body: RequestType::json(&json!({"id": "1"})).unwrap(),
        };

        let response = ReqwestTransport::new().unwrap().send(request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "{}");
    }

    #[tokio::test]
    async fn test_reqwest_transport_reports_connection_errors() {
        let request = TransportRequest {
            method: Method::GET,
            url: Url::parse("http://127.0.0.1:1/search/drill").unwrap(),
            headers: HeaderMap::new(),
            body: RequestType::Plain,
        };

        let result = ReqwestTransport::new().unwrap().send(request).await;
        assert!(result.is_err());
    }
}
