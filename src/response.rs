use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single result, with the `result_id` of the request that returned it.
///
/// The service returns items of varying shape per index, so everything
/// besides `result_id` is kept as raw JSON in `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,

    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ResultItem {
    /// Shortcut for a field of the item, e.g. `value` or `data`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// Response of the search, browse and recommendations endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsResponse {
    /// Echo of the request as the service understood it
    #[serde(default)]
    pub request: Map<String, Value>,

    #[serde(default)]
    pub response: SearchResults,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultsResponse {
    pub fn results(&self) -> &[ResultItem] {
        &self.response.results
    }

    /// The redirect rule the search term matched, if any
    pub fn redirect(&self) -> Option<&Redirect> {
        self.response.redirect.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<ResultItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,

    /// Facets, groups, sort options, counts and whatever else is returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Returned by search instead of results when the term matches a redirect rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Redirect {
    #[serde(default)]
    pub matched_terms: Vec<String>,

    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Redirect {
    /// Target of the redirect
    pub fn url(&self) -> Option<&str> {
        self.data.get("url").and_then(Value::as_str)
    }
}

/// Response of the autocomplete endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub request: Map<String, Value>,

    /// Section name to the items suggested for it
    #[serde(default)]
    pub sections: BTreeMap<String, Vec<ResultItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_results_response_keeps_unknown_fields() {
        let response: ResultsResponse = serde_json::from_value(json!({
            "request": {"term": "drill"},
            "response": {
                "results": [{"value": "drill", "data": {"id": "1"}, "result_id": "abc"}],
                "total_num_results": 1,
                "facets": []
            },
            "result_id": "abc"
        }))
        .unwrap();

        assert_eq!(response.result_id.as_deref(), Some("abc"));
        assert_eq!(response.results().len(), 1);
        assert_eq!(response.results()[0].result_id.as_deref(), Some("abc"));
        assert_eq!(response.results()[0].get("value"), Some(&json!("drill")));
        assert_eq!(response.response.extra["total_num_results"], 1);
    }

    #[test]
    fn test_autocomplete_response_sections() {
        let response: AutocompleteResponse = serde_json::from_value(json!({
            "request": {},
            "sections": {
                "Products": [{"value": "drill", "result_id": "abc"}],
                "Search Suggestions": []
            },
            "result_id": "abc"
        }))
        .unwrap();

        assert_eq!(response.sections.len(), 2);
        assert_eq!(
            response.sections["Products"][0].result_id.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_result_item_serializes_flat() {
        let item = ResultItem {
            result_id: Some("abc".to_string()),
            data: Map::from_iter([("value".to_string(), json!("drill"))]),
        };

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"value": "drill", "result_id": "abc"})
        );
    }
}
