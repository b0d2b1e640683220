//! Parameter types shared by the search and browse endpoints.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::query::{insert_if_some, QueryBuilder};
use crate::validation::{
    expect_filters, expect_fmt_options, expect_object, expect_positive_integer, expect_sort_order,
    expect_string, field, reject_unknown_keys, validate_filters, validate_non_empty, validate_positive,
};

/// Facet name to the values it is filtered by
pub type Filters = BTreeMap<String, Vec<String>>;

/// Order of sorted results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = ClientError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "ascending" => Ok(SortOrder::Ascending),
            "descending" => Ok(SortOrder::Descending),
            _ => Err(ClientError::validation(format!(
                "sortOrder must be either `ascending` or `descending`, got `{input}`"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortOrder::Ascending => "ascending",
                SortOrder::Descending => "descending",
            }
        )
    }
}

/// Where the returned group hierarchy starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupsStart {
    /// Start at the group currently filtered on
    Current,
    /// Start at the root of the hierarchy
    Top,
}

impl FromStr for GroupsStart {
    type Err = ClientError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "current" => Ok(GroupsStart::Current),
            "top" => Ok(GroupsStart::Top),
            _ => Err(ClientError::validation(format!(
                "fmtOptions.groups_start must be either `current` or `top`, got `{input}`"
            ))),
        }
    }
}

impl fmt::Display for GroupsStart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GroupsStart::Current => "current",
                GroupsStart::Top => "top",
            }
        )
    }
}

/// Formatting options, sent as `fmt_options[<key>]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FmtOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups_max_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups_start: Option<GroupsStart>,
}

impl FmtOptions {
    pub fn is_empty(&self) -> bool {
        self.groups_max_depth.is_none() && self.groups_start.is_none()
    }
}

/// Parameters of a search or browse request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultParameters {
    /// Index section to query, e.g. `Products`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_per_page: Option<u32>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: Filters,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    #[serde(default, skip_serializing_if = "FmtOptions::is_empty")]
    pub fmt_options: FmtOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
}

const RESULT_PARAMETER_KEYS: [&str; 8] = [
    "section",
    "page",
    "resultsPerPage",
    "filters",
    "sortBy",
    "sortOrder",
    "fmtOptions",
    "collectionId",
];

impl ResultParameters {
    /// Builds parameters from loosely typed JSON, checking every field's shape
    pub fn from_value(value: &Value) -> ClientResult<Self> {
        let map = expect_object(value, "parameters")?;
        reject_unknown_keys(map, &RESULT_PARAMETER_KEYS)?;

        let string = |key: &str| field(map, key).map(|v| expect_string(v, key)).transpose();
        let integer = |key: &str| {
            field(map, key)
                .map(|v| expect_positive_integer(v, key))
                .transpose()
        };

        let parameters = ResultParameters {
            section: string("section")?,
            page: integer("page")?,
            results_per_page: integer("resultsPerPage")?,
            filters: field(map, "filters")
                .map(expect_filters)
                .transpose()?
                .unwrap_or_default(),
            sort_by: string("sortBy")?,
            sort_order: field(map, "sortOrder").map(expect_sort_order).transpose()?,
            fmt_options: field(map, "fmtOptions")
                .map(expect_fmt_options)
                .transpose()?
                .unwrap_or_default(),
            collection_id: string("collectionId")?,
        };

        parameters.validate()?;
        Ok(parameters)
    }

    /// Checks the invariants the type system does not cover
    pub fn validate(&self) -> ClientResult<()> {
        validate_positive(self.page, "page")?;
        validate_positive(self.results_per_page, "resultsPerPage")?;
        validate_non_empty(self.section.as_deref(), "section")?;
        validate_filters(&self.filters)?;
        validate_non_empty(self.sort_by.as_deref(), "sortBy")?;
        validate_non_empty(self.collection_id.as_deref(), "collectionId")?;
        Ok(())
    }

    /// Appends the parameters to a query in their wire names
    pub fn append_to(&self, query: &mut QueryBuilder) {
        insert_if_some!(query,
            "section" => self.section,
            "page" => self.page,
            "num_results_per_page" => self.results_per_page,
        );
        query.insert_filters(&self.filters);
        insert_if_some!(query,
            "sort_by" => self.sort_by,
            "sort_order" => self.sort_order,
            "collection_id" => self.collection_id,
        );
        query.insert_fmt_options(&self.fmt_options);
    }
}
