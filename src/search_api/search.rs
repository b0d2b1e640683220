use crate::client::{evaluate_json, into_typed, BaseClient};
use crate::config::UserParameters;
use crate::error::ClientResult;
use crate::headers::build_headers;
use crate::normalize::{normalize, Collection};
use crate::parameters::ResultParameters;
use crate::request::RequestType;
use crate::response::ResultsResponse;
use crate::validation::validate_term;

const OPERATION: &str = "getSearchResults";

/// Retrieves search results for a query.
///
/// Parameters and user overrides are validated before anything is sent. The
/// response must carry either a `response.results` collection, whose items
/// are stamped with the response's `result_id`, or a `response.redirect`
/// when the term matched a redirect rule.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `query` - The search term, a non-empty string.
/// * `parameters` - Pagination, filters, sorting and format options.
/// * `user` - Per-call identity overrides, user IP and user agent.
///
/// # Returns
///
/// The deserialized [`ResultsResponse`], or a [`ClientError`](crate::error::ClientError).
pub async fn get_search_results(
    client: &BaseClient,
    query: &str,
    parameters: &ResultParameters,
    user: &UserParameters,
) -> ClientResult<ResultsResponse> {
    validate_term(query, "query")?;
    parameters.validate()?;
    user.validate()?;

    // Endpoint metadata
    let mut params = client.identity_query(user);
    parameters.append_to(&mut params);

    let url = client.endpoint_url(&["search", query], &params.build())?;
    let headers = build_headers(client.options(), user)?;

    let response = client.get(url, RequestType::Plain, headers).await;

    let body = evaluate_json(response, OPERATION)?;
    let body = normalize(body, Some(Collection::ResultsOrRedirect), OPERATION)?;
    into_typed(body, OPERATION)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::error::ClientError;
    use crate::parameters::{FmtOptions, GroupsStart, SortOrder};
    use crate::test_utils::{query_pairs, query_values, spy_client, test_options};
    use crate::transport::TransportResponse;

    use super::*;

    fn search_body() -> serde_json::Value {
        json!({
            "request": {"term": "drill"},
            "response": {
                "results": [{"value": "Cordless Drill", "data": {"id": "1"}}],
                "total_num_results": 1
            },
            "result_id": "abc"
        })
    }

    #[tokio::test]
    async fn test_search_sends_mandatory_query_keys() {
        let (client, spy) = spy_client(search_body());

        get_search_results(
            &client,
            "drill",
            &ResultParameters::default(),
            &UserParameters::default(),
        )
        .await
        .unwrap();

        let request = spy.last_request().unwrap();
        assert_eq!(request.url.path(), "/search/drill");

        let keys: Vec<String> = query_pairs(&request.url).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["c", "key", "i", "s", "_dt"]);
        assert!(request.headers.is_empty());
    }

    #[tokio::test]
    async fn test_search_stamps_result_id() {
        let (client, _spy) = spy_client(search_body());

        let response = get_search_results(
            &client,
            "drill",
            &ResultParameters::default(),
            &UserParameters::default(),
        )
        .await
        .unwrap();

        assert_eq!(response.result_id.as_deref(), Some("abc"));
        assert_eq!(response.results()[0].result_id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_search_encodes_parameters() {
        let (client, spy) = spy_client(search_body());

        let parameters = ResultParameters {
            section: Some("Search Suggestions".to_string()),
            page: Some(2),
            results_per_page: Some(20),
            filters: [("keywords".to_string(), vec!["battery-powered".to_string()])].into(),
            sort_by: Some("relevance".to_string()),
            sort_order: Some(SortOrder::Ascending),
            fmt_options: FmtOptions {
                groups_max_depth: Some(2),
                groups_start: Some(GroupsStart::Top),
            },
            collection_id: None,
        };

        get_search_results(&client, "drill", &parameters, &UserParameters::default())
            .await
            .unwrap();

        let url = spy.last_request().unwrap().url;
        assert_eq!(query_values(&url, "section"), vec!["Search Suggestions"]);
        assert_eq!(query_values(&url, "page"), vec!["2"]);
        assert_eq!(query_values(&url, "num_results_per_page"), vec!["20"]);
        assert_eq!(query_values(&url, "filters[keywords]"), vec!["battery-powered"]);
        assert_eq!(query_values(&url, "sort_by"), vec!["relevance"]);
        assert_eq!(query_values(&url, "sort_order"), vec!["ascending"]);
        assert_eq!(query_values(&url, "fmt_options[groups_max_depth]"), vec!["2"]);
        assert_eq!(query_values(&url, "fmt_options[groups_start]"), vec!["top"]);
    }

    #[tokio::test]
    async fn test_search_applies_user_parameters() {
        let (client, spy) = spy_client(search_body());

        let user = UserParameters {
            session_id: Some("9".to_string()),
            segments: Some(vec!["a".to_string(), "b".to_string()]),
            test_cells: Some([("foo".to_string(), "bar".to_string())].into()),
            user_id: Some("user-1".to_string()),
            user_ip: Some("127.0.0.1".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
            ..Default::default()
        };

        get_search_results(&client, "drill", &ResultParameters::default(), &user)
            .await
            .unwrap();

        let request = spy.last_request().unwrap();
        assert_eq!(query_values(&request.url, "s"), vec!["9"]);
        assert_eq!(query_values(&request.url, "i"), vec!["client-id"]);
        assert_eq!(query_values(&request.url, "us"), vec!["a", "b"]);
        assert_eq!(query_values(&request.url, "ef-foo"), vec!["bar"]);
        assert_eq!(query_values(&request.url, "ui"), vec!["user-1"]);
        assert_eq!(request.headers["X-Forwarded-For"], "127.0.0.1");
        assert_eq!(request.headers["User-Agent"], "Mozilla/5.0");
    }

    #[tokio::test]
    async fn test_search_sends_security_token() {
        let options = test_options().with_security_token("cio-token");
        let (client, spy) = crate::test_utils::spy_client_with(
            options,
            TransportResponse::new(200, search_body().to_string()),
        );

        get_search_results(
            &client,
            "drill",
            &ResultParameters::default(),
            &UserParameters::default(),
        )
        .await
        .unwrap();

        assert_eq!(spy.last_request().unwrap().headers["x-cnstrc-token"], "cio-token");
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_transport() {
        let (client, spy) = spy_client(search_body());

        let invalid = [
            ("", ResultParameters::default(), UserParameters::default()),
            (
                "drill",
                ResultParameters {
                    page: Some(0),
                    ..Default::default()
                },
                UserParameters::default(),
            ),
            (
                "drill",
                ResultParameters {
                    filters: [("keywords".to_string(), vec![])].into(),
                    ..Default::default()
                },
                UserParameters::default(),
            ),
            (
                "drill",
                ResultParameters::default(),
                UserParameters {
                    user_agent: Some("bad\nagent".to_string()),
                    ..Default::default()
                },
            ),
        ];

        for (query, parameters, user) in invalid {
            let result = get_search_results(&client, query, &parameters, &user).await;
            assert!(matches!(result, Err(ClientError::Validation(_))));
        }

        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_without_results_is_malformed() {
        let (client, _spy) = spy_client(json!({"response": {}, "result_id": "abc"}));

        let err = get_search_results(
            &client,
            "drill",
            &ResultParameters::default(),
            &UserParameters::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "getSearchResults response data is malformed");
    }

    #[tokio::test]
    async fn test_search_returns_redirect() {
        let (client, _spy) = spy_client(json!({
            "request": {"term": "rolling"},
            "response": {
                "redirect": {
                    "matched_terms": ["rolling"],
                    "data": {"url": "/rolling-pins"}
                }
            },
            "result_id": "abc"
        }));

        let response = get_search_results(
            &client,
            "rolling",
            &ResultParameters::default(),
            &UserParameters::default(),
        )
        .await
        .unwrap();

        let redirect = response.redirect().unwrap();
        assert_eq!(redirect.matched_terms, vec!["rolling"]);
        assert_eq!(redirect.url(), Some("/rolling-pins"));
        assert!(response.results().is_empty());
    }

    #[tokio::test]
    async fn test_search_against_mock_server() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search/drill")
                    .query_param("key", "key-123")
                    .query_param("c", "cio-test")
                    .query_param("filters[color]", "red")
                    .query_param_exists("_dt");
                then.status(200).json_body(search_body());
            })
            .await;

        let client =
            BaseClient::new(test_options().with_service_url(server.base_url())).unwrap();
        let parameters = ResultParameters {
            filters: [("color".to_string(), vec!["red".to_string()])].into(),
            ..Default::default()
        };

        let response =
            get_search_results(&client, "drill", &parameters, &UserParameters::default())
                .await
                .unwrap();

        mock.assert_async().await;
        assert_eq!(response.results().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_key_error_is_passed_through() {
        let server = MockServer::start_async().await;
        let _mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/search/drill");
                then.status(401).json_body(json!({
                    "message": "You have supplied an invalid `key` or `autocomplete_key`. You can find your key at app.constructor.io/dashboard/accounts/api_integration."
                }));
            })
            .await;

        let client = BaseClient::new(
            test_options()
                .with_service_url(server.base_url())
                .with_segments(["a"]),
        )
        .unwrap();

        let err = get_search_results(
            &client,
            "drill",
            &ResultParameters::default(),
            &UserParameters::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err
            .to_string()
            .contains("You have supplied an invalid `key` or `autocomplete_key`."));
    }
}
