use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientResult;
use crate::parameters::Filters;
use crate::query::{insert_if_some, QueryBuilder};
use crate::validation::{
    expect_filters, expect_object, expect_positive_integer, expect_section_counts, field,
    reject_unknown_keys, validate_filters, validate_positive,
};

/// Parameters of an autocomplete request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteParameters {
    /// Total number of suggestions across all sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_results: Option<u32>,

    /// Number of suggestions per section, e.g. `{"Products": 5}`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub results_per_section: BTreeMap<String, u32>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: Filters,
}

const AUTOCOMPLETE_PARAMETER_KEYS: [&str; 3] = ["numResults", "resultsPerSection", "filters"];

impl AutocompleteParameters {
    /// Builds parameters from loosely typed JSON
    pub fn from_value(value: &Value) -> ClientResult<Self> {
        let map = expect_object(value, "parameters")?;
        reject_unknown_keys(map, &AUTOCOMPLETE_PARAMETER_KEYS)?;

        let parameters = AutocompleteParameters {
            num_results: field(map, "numResults")
                .map(|v| expect_positive_integer(v, "numResults"))
                .transpose()?,
            results_per_section: field(map, "resultsPerSection")
                .map(|v| expect_section_counts(v, "resultsPerSection"))
                .transpose()?
                .unwrap_or_default(),
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
        for (section, count) in &self.results_per_section {
            validate_positive(Some(*count), &format!("resultsPerSection.{section}"))?;
        }
        validate_filters(&self.filters)
    }

    /// Appends `num_results`, `num_results_<section>` and filters
    pub fn append_to(&self, query: &mut QueryBuilder) {
        insert_if_some!(query, "num_results" => self.num_results);

        for (section, count) in &self.results_per_section {
            query.insert(format!("num_results_{section}"), count);
        }

        query.insert_filters(&self.filters);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value() {
        let parameters = AutocompleteParameters::from_value(&json!({
            "numResults": 20,
            "resultsPerSection": {"Products": 5, "Search Suggestions": 10},
            "filters": {"keywords": ["battery-powered"]}
        }))
        .unwrap();

        assert_eq!(parameters.num_results, Some(20));
        assert_eq!(parameters.results_per_section["Search Suggestions"], 10);
        assert_eq!(parameters.filters["keywords"], vec!["battery-powered"]);
    }

    #[test]
    fn test_from_value_rejects_bad_shapes() {
        assert!(AutocompleteParameters::from_value(&json!({"numResults": "abc"})).is_err());
        assert!(AutocompleteParameters::from_value(&json!({"resultsPerSection": 5})).is_err());
        assert!(AutocompleteParameters::from_value(&json!({"filters": ["a"]})).is_err());

        let err = AutocompleteParameters::from_value(&json!({"results": 5})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown parameter: `results`");
    }

    #[test]
    fn test_append_to() {
        let parameters = AutocompleteParameters {
            num_results: Some(20),
            results_per_section: BTreeMap::from([
                ("Products".to_string(), 5),
                ("Search Suggestions".to_string(), 10),
            ]),
            filters: Filters::from([("color".to_string(), vec!["red".to_string()])]),
        };

        let mut query = QueryBuilder::new();
        parameters.append_to(&mut query);

        assert_eq!(
            query.pairs(),
            &[
                ("num_results".to_string(), "20".to_string()),
                ("num_results_Products".to_string(), "5".to_string()),
                ("num_results_Search Suggestions".to_string(), "10".to_string()),
                ("filters[color]".to_string(), "red".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_zero_section_count() {
        let parameters = AutocompleteParameters {
            results_per_section: BTreeMap::from([("Products".to_string(), 0)]),
            ..Default::default()
        };

        assert_eq!(
            parameters.validate().unwrap_err().to_string(),
            "resultsPerSection.Products must be a positive integer"
        );
    }
}
