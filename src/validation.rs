//! Parameter validation.
//!
//! Typed parameter structs call the `validate_*` helpers from their
//! `validate()` methods. The `expect_*` helpers convert loosely typed JSON
//! (parameter files, values built at runtime) into typed fields and reject
//! anything of the wrong shape. Both run before a request is built, so a
//! failure here means nothing was sent.

use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};
use crate::parameters::{Filters, FmtOptions, GroupsStart, SortOrder};

/// Keys accepted inside `fmtOptions`
pub const FMT_OPTION_KEYS: [&str; 2] = ["groups_max_depth", "groups_start"];

/// Checks that a term (query, pod id, phrase, ...) is a non-empty string
pub fn validate_term(term: &str, name: &str) -> ClientResult<()> {
    if term.is_empty() {
        return Err(ClientError::validation(format!(
            "{name} is a required parameter of type string"
        )));
    }
    Ok(())
}

/// Checks that an optional count is at least one
pub fn validate_positive(value: Option<u32>, name: &str) -> ClientResult<()> {
    match value {
        Some(0) => Err(ClientError::validation(format!(
            "{name} must be a positive integer"
        ))),
        _ => Ok(()),
    }
}

/// Checks that an optional string is not empty
pub fn validate_non_empty(value: Option<&str>, name: &str) -> ClientResult<()> {
    match value {
        Some(value) if value.is_empty() => Err(ClientError::validation(format!(
            "{name} must be a non-empty string"
        ))),
        _ => Ok(()),
    }
}

/// Checks that no facet is empty and no facet has an empty value list
pub fn validate_filters(filters: &Filters) -> ClientResult<()> {
    for (facet, values) in filters {
        if facet.is_empty() {
            return Err(ClientError::validation("filters must not contain an empty facet name"));
        }
        if values.is_empty() {
            return Err(ClientError::validation(format!(
                "filters.{facet} must contain at least one value"
            )));
        }
    }
    Ok(())
}

/// Returns the value as an object, or fails naming the field
pub fn expect_object<'a>(value: &'a Value, name: &str) -> ClientResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ClientError::validation(format!("{name} must be an object")))
}

/// Returns the value under `key`, treating JSON `null` as absent
pub fn field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// Fails on keys outside of `allowed`
pub fn reject_unknown_keys(map: &Map<String, Value>, allowed: &[&str]) -> ClientResult<()> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ClientError::validation(format!(
            "Unknown parameter: `{key}`"
        ))),
        None => Ok(()),
    }
}

pub fn expect_string(value: &Value, name: &str) -> ClientResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(ClientError::validation(format!(
            "{name} must be a string"
        ))),
    }
}

pub fn expect_bool(value: &Value, name: &str) -> ClientResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ClientError::validation(format!("{name} must be a boolean")))
}

/// Accepts JSON integers and integer strings that are `>= min`.
///
/// Floats, float strings, non-numeric strings and arrays are rejected.
pub fn expect_integer(value: &Value, name: &str, min: u32) -> ClientResult<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n >= min => Ok(n),
        _ if min > 0 => Err(ClientError::validation(format!(
            "{name} must be a positive integer"
        ))),
        _ => Err(ClientError::validation(format!(
            "{name} must be an integer"
        ))),
    }
}

pub fn expect_positive_integer(value: &Value, name: &str) -> ClientResult<u32> {
    expect_integer(value, name, 1)
}

pub fn expect_string_list(value: &Value, name: &str) -> ClientResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| ClientError::validation(format!("{name} must be an array of strings")))?;

    items
        .iter()
        .map(|item| expect_string(item, name))
        .collect()
}

/// Converts `{facet: [primitive, ...]}` into [`Filters`]
pub fn expect_filters(value: &Value) -> ClientResult<Filters> {
    let map = expect_object(value, "filters")?;
    let mut filters = Filters::new();

    for (facet, values) in map {
        let values = values.as_array().ok_or_else(|| {
            ClientError::validation(format!("filters.{facet} must be an array"))
        })?;

        let values = values
            .iter()
            .map(|value| match value {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                _ => Err(ClientError::validation(format!(
                    "filters.{facet} values must be strings, numbers or booleans"
                ))),
            })
            .collect::<ClientResult<Vec<String>>>()?;

        filters.insert(facet.clone(), values);
    }

    validate_filters(&filters)?;
    Ok(filters)
}

pub fn expect_sort_order(value: &Value) -> ClientResult<SortOrder> {
    expect_string(value, "sortOrder")?.parse()
}

/// Converts `{groups_max_depth, groups_start}` into [`FmtOptions`]
pub fn expect_fmt_options(value: &Value) -> ClientResult<FmtOptions> {
    let map = expect_object(value, "fmtOptions")?;

    if let Some(key) = map.keys().find(|key| !FMT_OPTION_KEYS.contains(&key.as_str())) {
        return Err(ClientError::validation(format!(
            "Unknown format option: `{key}`"
        )));
    }

    let groups_max_depth = map
        .get("groups_max_depth")
        .map(|v| expect_integer(v, "fmtOptions.groups_max_depth", 0))
        .transpose()?;

    let groups_start = map
        .get("groups_start")
        .map(|v| expect_string(v, "fmtOptions.groups_start")?.parse::<GroupsStart>())
        .transpose()?;

    Ok(FmtOptions {
        groups_max_depth,
        groups_start,
    })
}

/// Converts `{section: count}` into a map of per-section counts
pub fn expect_section_counts(
    value: &Value,
    name: &str,
) -> ClientResult<std::collections::BTreeMap<String, u32>> {
    expect_object(value, name)?
        .iter()
        .map(|(section, count)| {
            let count = expect_positive_integer(count, &format!("{name}.{section}"))?;
            Ok((section.clone(), count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validate_term() {
        assert!(validate_term("drill", "query").is_ok());

        assert!(validate_term("  ", "query").is_ok());

        let err = validate_term("", "query").unwrap_err();
        assert_eq!(err.to_string(), "query is a required parameter of type string");
    }

    #[test]
    fn test_expect_integer_accepts_integers_and_integer_strings() {
        assert_eq!(expect_positive_integer(&json!(2), "page").unwrap(), 2);
        assert_eq!(expect_positive_integer(&json!("3"), "page").unwrap(), 3);
        assert_eq!(expect_integer(&json!(0), "depth", 0).unwrap(), 0);
    }

    #[test]
    fn test_expect_integer_rejects_bad_shapes() {
        let bad = [
            json!("abc"),
            json!("2.5"),
            json!(2.5),
            json!([1, 2]),
            json!(0),
            json!(-1),
            json!(null),
        ];

        for value in bad {
            let err = expect_positive_integer(&value, "page").unwrap_err();
            assert_eq!(err.to_string(), "page must be a positive integer", "{value}");
        }

        let err = expect_integer(&json!("x"), "depth", 0).unwrap_err();
        assert_eq!(err.to_string(), "depth must be an integer");
    }

    #[test]
    fn test_expect_filters() {
        let filters = expect_filters(&json!({
            "keywords": ["battery-powered"],
            "size": [10, true]
        }))
        .unwrap();

        assert_eq!(filters["keywords"], vec!["battery-powered"]);
        assert_eq!(filters["size"], vec!["10", "true"]);
    }

    #[test]
    fn test_expect_filters_rejects_bad_shapes() {
        assert!(expect_filters(&json!("abc")).is_err());
        assert!(expect_filters(&json!({"keywords": "battery-powered"})).is_err());
        assert!(expect_filters(&json!({"keywords": [{"nested": 1}]})).is_err());

        let err = expect_filters(&json!({"keywords": []})).unwrap_err();
        assert_eq!(err.to_string(), "filters.keywords must contain at least one value");
    }

    #[test]
    fn test_expect_sort_order() {
        assert_eq!(
            expect_sort_order(&json!("descending")).unwrap(),
            SortOrder::Descending
        );
        assert!(expect_sort_order(&json!(123)).is_err());
        assert!(expect_sort_order(&json!("sideways")).is_err());
    }

    #[test]
    fn test_expect_fmt_options() {
        let fmt = expect_fmt_options(&json!({
            "groups_max_depth": 2,
            "groups_start": "current"
        }))
        .unwrap();

        assert_eq!(fmt.groups_max_depth, Some(2));
        assert_eq!(fmt.groups_start, Some(GroupsStart::Current));
    }

    #[test]
    fn test_expect_fmt_options_rejects_unknown_key() {
        let err = expect_fmt_options(&json!({"groups_depth": 2})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown format option: `groups_depth`");

        assert!(expect_fmt_options(&json!({"groups_max_depth": "two"})).is_err());
        assert!(expect_fmt_options(&json!({"groups_start": "middle"})).is_err());
        assert!(expect_fmt_options(&json!(["groups_start"])).is_err());
    }

    #[test]
    fn test_reject_unknown_keys() {
        let map = json!({"page": 1, "pg": 2});
        let err = reject_unknown_keys(map.as_object().unwrap(), &["page"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown parameter: `pg`");
    }

    #[test]
    fn test_expect_string_list() {
        assert_eq!(
            expect_string_list(&json!(["a", "b"]), "itemIds").unwrap(),
            vec!["a", "b"]
        );
        assert!(expect_string_list(&json!("a"), "itemIds").is_err());
        assert!(expect_string_list(&json!(["a", 1]), "itemIds").is_err());
    }

    #[test]
    fn test_expect_section_counts() {
        let counts = expect_section_counts(
            &json!({"Products": 5, "Search Suggestions": "2"}),
            "resultsPerSection",
        )
        .unwrap();

        assert_eq!(counts["Products"], 5);
        assert_eq!(counts["Search Suggestions"], 2);
        assert!(expect_section_counts(&json!({"Products": 0}), "resultsPerSection").is_err());
    }
}
