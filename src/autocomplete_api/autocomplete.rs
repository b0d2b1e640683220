use crate::autocomplete_api::query::AutocompleteParameters;
use crate::client::{evaluate_json, into_typed, BaseClient};
use crate::config::UserParameters;
use crate::error::ClientResult;
use crate::headers::build_headers;
use crate::normalize::{normalize, Collection};
use crate::request::RequestType;
use crate::response::AutocompleteResponse;
use crate::validation::validate_term;

const OPERATION: &str = "getAutocompleteResults";

/// Retrieves autocomplete suggestions for a partial query.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `query` - The partial term typed so far.
/// * `parameters` - Result counts and filters.
/// * `user` - Per-call identity overrides, user IP and user agent.
///
/// # Returns
///
/// The suggestions grouped by section. A response without `sections` is
/// rejected as malformed.
pub async fn get_autocomplete_results(
    client: &BaseClient,
    query: &str,
    parameters: &AutocompleteParameters,
    user: &UserParameters,
) -> ClientResult<AutocompleteResponse> {
    validate_term(query, "query")?;
    parameters.validate()?;
    user.validate()?;

    let mut params = client.identity_query(user);
    parameters.append_to(&mut params);

    let url = client.endpoint_url(&["autocomplete", query], &params.build())?;
    let headers = build_headers(client.options(), user)?;

    let response = client.get(url, RequestType::Plain, headers).await;

    let body = evaluate_json(response, OPERATION)?;
    let body = normalize(body, Some(Collection::Sections), OPERATION)?;
    into_typed(body, OPERATION)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::error::ClientError;
    use crate::test_utils::{query_pairs, query_values, spy_client, test_options};

    use super::*;

    fn autocomplete_body() -> serde_json::Value {
        json!({
            "request": {"term": "dri"},
            "sections": {
                "Products": [{"value": "Cordless Drill"}],
                "Search Suggestions": [{"value": "drill"}, {"value": "drill bits"}]
            },
            "result_id": "abc"
        })
    }

    #[tokio::test]
    async fn test_autocomplete_stamps_every_section() {
        let (client, spy) = spy_client(autocomplete_body());

        let response = get_autocomplete_results(
            &client,
            "dri",
            &AutocompleteParameters::default(),
            &UserParameters::default(),
        )
        .await
        .unwrap();

        assert_eq!(spy.last_request().unwrap().url.path(), "/autocomplete/dri");
        for items in response.sections.values() {
            for item in items {
                assert_eq!(item.result_id.as_deref(), Some("abc"));
            }
        }
    }

    #[tokio::test]
    async fn test_autocomplete_query_parameters() {
        let (client, spy) = spy_client(autocomplete_body());

        let parameters = AutocompleteParameters {
            num_results: Some(20),
            results_per_section: BTreeMap::from([("Products".to_string(), 5)]),
            ..Default::default()
        };
        let user = UserParameters {
            segments: Some(vec!["a".to_string(), "b".to_string()]),
            ..Default::default()
        };

        get_autocomplete_results(&client, "dri", &parameters, &user)
            .await
            .unwrap();

        let url = spy.last_request().unwrap().url;
        let keys: Vec<String> = query_pairs(&url).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["c", "key", "i", "s", "us", "us", "num_results", "num_results_Products", "_dt"]
        );
        assert_eq!(query_values(&url, "us"), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_autocomplete_without_sections_is_malformed() {
        let (client, _spy) = spy_client(json!({"result_id": "abc", "results": []}));

        let err = get_autocomplete_results(
            &client,
            "dri",
            &AutocompleteParameters::default(),
            &UserParameters::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "getAutocompleteResults response data is malformed"
        );
    }

    #[tokio::test]
    async fn test_autocomplete_validation_happens_before_sending() {
        let (client, spy) = spy_client(autocomplete_body());

        let parameters = AutocompleteParameters {
            num_results: Some(0),
            ..Default::default()
        };

        let result =
            get_autocomplete_results(&client, "dri", &parameters, &UserParameters::default())
                .await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_autocomplete_against_mock_server() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/autocomplete/dri")
                    .query_param("num_results_Products", "5")
                    .header("x-forwarded-for", "10.0.0.1");
                then.status(200).json_body(autocomplete_body());
            })
            .await;

        let client = BaseClient::new(test_options().with_service_url(server.base_url())).unwrap();
        let parameters = AutocompleteParameters {
            results_per_section: BTreeMap::from([("Products".to_string(), 5)]),
            ..Default::default()
        };
        let user = UserParameters {
            user_ip: Some("10.0.0.1".to_string()),
            ..Default::default()
        };

        let response = get_autocomplete_results(&client, "dri", &parameters, &user)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.sections["Search Suggestions"].len(), 2);
    }
}
