//! URL, header and dispatch plumbing shared by the catalog calls.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::client::{evaluate_optional_response, evaluate_response, BaseClient};
use crate::error::ClientResult;
use crate::headers::catalog_headers;
use crate::query::QueryBuilder;
use crate::request::RequestType;
use crate::transport::TransportResponse;

/// Path prefix of a catalog endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

/// Starts a catalog query.
///
/// Catalog queries carry no user identity. Some listing endpoints do not
/// accept the `c` version parameter, hence `with_version`.
pub(crate) fn catalog_query(client: &BaseClient, with_version: bool) -> QueryBuilder {
    let options = client.options();

    if with_version {
        QueryBuilder::with_credentials(&options.version, &options.api_key)
    } else {
        let mut query = QueryBuilder::new();
        query.insert("key", &options.api_key);
        query
    }
}

pub(crate) fn catalog_url(
    client: &BaseClient,
    version: ApiVersion,
    path: &[&str],
    query: QueryBuilder,
) -> ClientResult<Url> {
    let mut segments = vec![version.as_str()];
    segments.extend_from_slice(path);
    client.endpoint_url(&segments, &query.build())
}

async fn dispatch(
    client: &BaseClient,
    method: Method,
    url: Url,
    context: RequestType,
) -> ClientResult<TransportResponse> {
    let headers = catalog_headers(client.options())?;
    client.perform_request(method, url, context, headers).await
}

/// Sends a catalog write. An empty 2xx body yields `None`.
pub(crate) async fn send_write(
    client: &BaseClient,
    method: Method,
    url: Url,
    context: RequestType,
    operation: &str,
) -> ClientResult<Option<Value>> {
    let response = dispatch(client, method, url, context).await;
    evaluate_optional_response(response, operation)
}

/// Sends a catalog read and deserializes the body
pub(crate) async fn send_read<T: DeserializeOwned>(
    client: &BaseClient,
    url: Url,
    operation: &str,
) -> ClientResult<T> {
    let response = dispatch(client, Method::GET, url, RequestType::Plain).await;
    evaluate_response(response, operation)
}
