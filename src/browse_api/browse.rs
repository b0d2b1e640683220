use crate::client::{evaluate_json, into_typed, BaseClient};
use crate::config::UserParameters;
use crate::error::ClientResult;
use crate::headers::build_headers;
use crate::normalize::normalize;
use crate::parameters::ResultParameters;
use crate::request::RequestType;
use crate::response::ResultsResponse;
use crate::validation::validate_term;

const OPERATION: &str = "getBrowseResults";

/// Retrieves the items matching a filter name/value pair.
///
/// Browse takes no search term. Both `filter_name` and `filter_value` must be
/// non-empty and become their own path segments.
pub async fn get_browse_results(
    client: &BaseClient,
    filter_name: &str,
    filter_value: &str,
    parameters: &ResultParameters,
    user: &UserParameters,
) -> ClientResult<ResultsResponse> {
    validate_term(filter_name, "filterName")?;
    validate_term(filter_value, "filterValue")?;
    parameters.validate()?;
    user.validate()?;

    let mut params = client.identity_query(user);
    parameters.append_to(&mut params);

    let url = client.endpoint_url(&["browse", filter_name, filter_value], &params.build())?;
    let headers = build_headers(client.options(), user)?;

    let response = client.get(url, RequestType::Plain, headers).await;

    let body = evaluate_json(response, OPERATION)?;
    let body = normalize(body, None, OPERATION)?;
    into_typed(body, OPERATION)
}
