use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::parameters::Filters;
use crate::query::{insert_if_some, QueryBuilder};
use crate::validation::{
    expect_filters, expect_object, expect_positive_integer, expect_string, expect_string_list,
    field, reject_unknown_keys, validate_filters, validate_non_empty, validate_positive,
};

/// Parameters of a recommendations pod request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_results: Option<u32>,

    /// Items the recommendations are based on, sent as repeated `item_id`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Search term, for pods that recommend based on a query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    #[serde(default, skip_serializing_if = "Filters::is_empty")]
    pub filters: Filters,
}

const RECOMMENDATIONS_PARAMETER_KEYS: [&str; 5] =
    ["numResults", "itemIds", "section", "term", "filters"];

impl RecommendationsParameters {
    /// Builds parameters from loosely typed JSON.
    ///
    /// `itemIds` may be a single string or an array of strings.
    pub fn from_value(value: &Value) -> ClientResult<Self> {
        let map = expect_object(value, "parameters")?;
        reject_unknown_keys(map, &RECOMMENDATIONS_PARAMETER_KEYS)?;

        let item_ids = match field(map, "itemIds") {
            None => Vec::new(),
            Some(Value::String(id)) => vec![id.clone()],
            Some(value) => expect_string_list(value, "itemIds")?,
        };

        let parameters = RecommendationsParameters {
            num_results: field(map, "numResults")
                .map(|v| expect_positive_integer(v, "numResults"))
                .transpose()?,
            item_ids,
            section: field(map, "section")
                .map(|v| expect_string(v, "section"))
                .transpose()?,
            term: field(map, "term")
                .map(|v| expect_string(v, "term"))
                .transpose()?,
            filters: field(map, "filters")
                .map(expect_filters)
                .transpose()?
                .unwrap_or_default(),
        };

        parameters.validate()?;
        Ok(parameters)
    }

    pub fn validate(&self) -> ClientResult<()> {
        validate_positive(self.num_results, "numResults")?;

        if self.item_ids.iter().any(|id| id.is_empty()) {
            return Err(ClientError::validation(
                "itemIds must only contain non-empty strings",
            ));
        }

        validate_non_empty(self.section.as_deref(), "section")?;
        validate_non_empty(self.term.as_deref(), "term")?;
        validate_filters(&self.filters)
    }

    pub fn append_to(&self, query: &mut QueryBuilder) {
        insert_if_some!(query, "num_results" => self.num_results);
        query.insert_repeated("item_id", &self.item_ids);
        insert_if_some!(query,
            "term" => self.term,
            "section" => self.section,
        );
        query.insert_filters(&self.filters);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value_accepts_single_item_id() {
        let parameters =
            RecommendationsParameters::from_value(&json!({"itemIds": "power_drill"})).unwrap();
        assert_eq!(parameters.item_ids, vec!["power_drill"]);
    }

    #[test]
    fn test_from_value_rejects_bad_shapes() {
        assert!(RecommendationsParameters::from_value(&json!({"itemIds": [1, 2]})).is_err());
        assert!(RecommendationsParameters::from_value(&json!({"numResults": 2.5})).is_err());
        assert!(RecommendationsParameters::from_value(&json!({"term": ""})).is_err());
        assert!(RecommendationsParameters::from_value(&json!({"pod": "x"})).is_err());
    }

    #[test]
    fn test_from_value_treats_null_as_absent() {
        let parameters = RecommendationsParameters::from_value(&json!({
            "itemIds": null,
            "section": null,
            "term": null,
            "filters": null,
            "numResults": null
        }))
        .unwrap();

        assert_eq!(parameters, RecommendationsParameters::default());
        assert!(RecommendationsParameters::from_value(&json!({"section": ""})).is_err());
    }

    #[test]
    fn test_append_to() {
        let parameters = RecommendationsParameters {
            num_results: Some(4),
            item_ids: vec!["1".to_string(), "2".to_string()],
            section: Some("Products".to_string()),
            term: Some("drill".to_string()),
            filters: Filters::new(),
        };

        let mut query = QueryBuilder::new();
        parameters.append_to(&mut query);

        assert_eq!(
            query.pairs(),
            &[
                ("num_results".to_string(), "4".to_string()),
                ("item_id".to_string(), "1".to_string()),
                ("item_id".to_string(), "2".to_string()),
                ("term".to_string(), "drill".to_string()),
                ("section".to_string(), "Products".to_string()),
            ]
        );
    }
}
