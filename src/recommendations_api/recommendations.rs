use crate::client::{evaluate_json, into_typed, BaseClient};
use crate::config::UserParameters;
use crate::error::ClientResult;
use crate::headers::build_headers;
use crate::normalize::normalize;
use crate::recommendations_api::query::RecommendationsParameters;
use crate::request::RequestType;
use crate::response::ResultsResponse;
use crate::validation::validate_term;

const OPERATION: &str = "getRecommendations";

/// Retrieves the recommendations of a pod.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `pod_id` - Identifier of the recommendations pod.
/// * `parameters` - Seed items, term, section, filters and result count.
/// * `user` - Per-call identity overrides, user IP and user agent.
pub async fn get_recommendations(
    client: &BaseClient,
    pod_id: &str,
    parameters: &RecommendationsParameters,
    user: &UserParameters,
) -> ClientResult<ResultsResponse> {
    validate_term(pod_id, "podId")?;
    parameters.validate()?;
    user.validate()?;

    let mut params = client.identity_query(user);
    parameters.append_to(&mut params);

    let url = client.endpoint_url(
        &["recommendations", "v1", "pods", pod_id],
        &params.build(),
    )?;
    let headers = build_headers(client.options(), user)?;

    let response = client.get(url, RequestType::Plain, headers).await;

    let body = evaluate_json(response, OPERATION)?;
    let body = normalize(body, None, OPERATION)?;
    into_typed(body, OPERATION)
}
