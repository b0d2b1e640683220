use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientOptions, ClientOptionsUpdate, UserParameters};
use crate::error::{ClientError, ClientResult};
use crate::query::QueryBuilder;
use crate::request::RequestType;
use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

/// Entry point of every API call.
///
/// Holds the validated [`ClientOptions`] and the [`Transport`] requests are
/// sent through. Cloning is cheap, the transport is shared.
#[derive(Debug, Clone)]
pub struct BaseClient {
    base_url: Url,
    options: ClientOptions,
    transport: Arc<dyn Transport>,
}

// This is the base client that will be used to make requests to the API.
// It validates the options once, assembles endpoint URLs and provides
// methods to make GET, POST, PUT, PATCH and DELETE requests.
impl BaseClient {
    /// Creates a client that sends requests through a default [`ReqwestTransport`]
    pub fn new(options: ClientOptions) -> ClientResult<Self> {
        let transport =
            ReqwestTransport::new().map_err(|err| ClientError::Transport(Box::new(err)))?;
        Self::with_transport(options, Arc::new(transport))
    }

    /// Creates a client that sends requests through `transport`
    pub fn with_transport(
        options: ClientOptions,
        transport: Arc<dyn Transport>,
    ) -> ClientResult<Self> {
        let base_url = options.validate()?;

        Ok(BaseClient {
            base_url,
            options,
            transport,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Get the base URL of the client
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Replaces the provided option fields.
    ///
    /// Takes `&mut self`, so no request can be in flight on this client while
    /// the options change. Nothing is applied if the update is invalid.
    pub fn set_client_options(&mut self, update: ClientOptionsUpdate) -> ClientResult<()> {
        update.apply(&mut self.options)
    }

    /// Starts a query carrying the version, API key and merged identity
    pub fn identity_query(&self, user: &UserParameters) -> QueryBuilder {
        QueryBuilder::with_identity(
            &self.options.version,
            &self.options.api_key,
            &self.options.identity(user),
        )
    }

    /// Joins path segments onto the service URL and attaches the query.
    ///
    /// Each segment is percent-encoded on its own, so a term containing `/`
    /// stays a single segment.
    pub fn endpoint_url(&self, segments: &[&str], query: &str) -> ClientResult<Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::validation(format!(
                    "Service URL is not a valid base URL: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.set_query(Some(query));
        }

        Ok(url)
    }

    pub async fn get(
        &self,
        url: Url,
        context: RequestType,
        headers: HeaderMap,
    ) -> ClientResult<TransportResponse> {
        self.perform_request(Method::GET, url, context, headers)
            .await
    }

    pub async fn post(
        &self,
        url: Url,
        context: RequestType,
        headers: HeaderMap,
    ) -> ClientResult<TransportResponse> {
        self.perform_request(Method::POST, url, context, headers)
            .await
    }

    pub async fn put(
        &self,
        url: Url,
        context: RequestType,
        headers: HeaderMap,
    ) -> ClientResult<TransportResponse> {
        self.perform_request(Method::PUT, url, context, headers)
            .await
    }

    pub async fn patch(
        &self,
        url: Url,
        context: RequestType,
        headers: HeaderMap,
    ) -> ClientResult<TransportResponse> {
        self.perform_request(Method::PATCH, url, context, headers)
            .await
    }

    pub async fn delete(
        &self,
        url: Url,
        context: RequestType,
        headers: HeaderMap,
    ) -> ClientResult<TransportResponse> {
        self.perform_request(Method::DELETE, url, context, headers)
            .await
    }

    pub(crate) async fn perform_request(
        &self,
        method: Method,
        url: Url,
        context: RequestType,
        headers: HeaderMap,
    ) -> ClientResult<TransportResponse> {
        debug!(%method, url = %redact_key(&url), "sending request");

        let request = TransportRequest {
            method,
            url,
            headers,
            body: context,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(ClientError::Transport)?;

        debug!(status = response.status, "received response");
        Ok(response)
    }
}

/// Maps a non-2xx response to [`ClientError::Http`]
fn check_status(response: TransportResponse) -> ClientResult<TransportResponse> {
    if response.is_ok() {
        return Ok(response);
    }

    let message = error_message(&response);
    warn!(status = response.status, %message, "request failed");

    Err(ClientError::Http {
        status: response.status,
        message,
    })
}

/// The `message` of a JSON error body, or the status' reason phrase
fn error_message(response: &TransportResponse) -> String {
    response
        .json::<Value>()
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            StatusCode::from_u16(response.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string()
        })
}

/// Helper function to evaluate a response into its JSON body
pub fn evaluate_json(
    response: ClientResult<TransportResponse>,
    operation: &str,
) -> ClientResult<Value> {
    let response = check_status(response?)?;
    response
        .json::<Value>()
        .map_err(|_| ClientError::malformed(operation))
}

/// Helper function to evaluate a response into a typed body
pub fn evaluate_response<T>(
    response: ClientResult<TransportResponse>,
    operation: &str,
) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let body = evaluate_json(response, operation)?;
    into_typed(body, operation)
}

/// Like [`evaluate_json`], but accepts an empty 2xx body
pub fn evaluate_optional_response(
    response: ClientResult<TransportResponse>,
    operation: &str,
) -> ClientResult<Option<Value>> {
    let response = check_status(response?)?;

    if response.text().trim().is_empty() {
        return Ok(None);
    }

    response
        .json::<Value>()
        .map(Some)
        .map_err(|_| ClientError::malformed(operation))
}

/// Converts an already evaluated body into `T`
pub fn into_typed<T>(body: Value, operation: &str) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(body).map_err(|_| ClientError::malformed(operation))
}

/// The URL with the `key` parameter elided, for log lines
fn redact_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();

    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }

    redacted
}
