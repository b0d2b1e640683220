//! Request and response bodies of the catalog endpoints.
//!
//! The service accepts and returns more fields than are modelled here. Every
//! struct keeps unknown fields in `extra`, so nothing is lost on a round trip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};
use crate::file::UploadFile;
use crate::validation::{validate_non_empty, validate_positive};

/// An item of the index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Name as it appears in results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    /// Index section the item belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Between 1 and 100 million, higher ranks first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub facets: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(item_name: impl Into<String>, section: impl Into<String>) -> Self {
        Item {
            item_name: Some(item_name.into()),
            section: Some(section.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// An item is addressed by its name or its id
    pub fn validate(&self) -> ClientResult<()> {
        validate_non_empty(self.item_name.as_deref(), "item_name")?;
        validate_non_empty(self.id.as_deref(), "id")?;

        if self.item_name.is_none() && self.id.is_none() {
            return Err(ClientError::validation(
                "item_name or id is a required parameter of type string",
            ));
        }
        Ok(())
    }
}

/// Up to 1000 items of one section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemBatch {
    pub section: String,
    pub items: Vec<Item>,
}

impl ItemBatch {
    pub fn new(section: impl Into<String>, items: Vec<Item>) -> Self {
        ItemBatch {
            section: section.into(),
            items,
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        validate_non_empty(Some(self.section.as_str()), "section")?;
        if self.items.is_empty() {
            return Err(ClientError::validation("items must contain at least one item"));
        }
        self.items.iter().try_for_each(Item::validate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query of [`get_items`](crate::catalog_api::items::get_items)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemListParameters {
    pub section: Option<String>,
    pub page: Option<u32>,
    pub num_results_per_page: Option<u32>,
}

impl ItemListParameters {
    pub fn validate(&self) -> ClientResult<()> {
        validate_non_empty(self.section.as_deref(), "section")?;
        validate_positive(self.page, "page")?;
        validate_positive(self.num_results_per_page, "num_results_per_page")
    }
}

/// A group (category) items can be assigned to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemGroup {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parent group id, `None` for root groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ItemGroup {
            id: id.into(),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Body of the bulk item group calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemGroups {
    pub item_groups: Vec<ItemGroup>,
}

impl ItemGroups {
    pub fn validate(&self) -> ClientResult<()> {
        if self.item_groups.is_empty() {
            return Err(ClientError::validation(
                "item_groups must contain at least one item group",
            ));
        }
        if self.item_groups.iter().any(|group| group.id.is_empty()) {
            return Err(ClientError::validation("item_groups.id must be a non-empty string"));
        }
        Ok(())
    }
}

/// Fields of a single item group that can be replaced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemGroupUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A set of phrases that are treated as equivalent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynonymGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonym_group_id: Option<u64>,

    #[serde(default)]
    pub synonyms: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SynonymGroup {
    pub fn new<I, S>(synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SynonymGroup {
            synonyms: synonyms.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.synonyms.is_empty() || self.synonyms.iter().any(String::is_empty) {
            return Err(ClientError::validation(
                "synonyms must be a list of non-empty strings",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynonymGroupList {
    #[serde(default)]
    pub synonym_groups: Vec<SynonymGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A phrase a one-way synonym expands to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildPhrase {
    pub phrase: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The child phrases of a one-way synonym.
///
/// The parent phrase is part of the URL, not of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneWaySynonym {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_phrase: Option<String>,

    #[serde(default)]
    pub child_phrases: Vec<ChildPhrase>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OneWaySynonym {
    pub fn new<I, S>(child_phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OneWaySynonym {
            child_phrases: child_phrases
                .into_iter()
                .map(|phrase| ChildPhrase {
                    phrase: phrase.into(),
                    extra: Map::new(),
                })
                .collect(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneWaySynonymList {
    #[serde(default)]
    pub one_way_synonyms: Vec<OneWaySynonym>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query of the synonym listing calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymListParameters {
    pub num_results_per_page: Option<u32>,
    pub page: Option<u32>,
    /// Only synonyms containing this phrase
    pub phrase: Option<String>,
}

impl SynonymListParameters {
    pub fn validate(&self) -> ClientResult<()> {
        validate_positive(self.num_results_per_page, "num_results_per_page")?;
        validate_positive(self.page, "page")?;
        validate_non_empty(self.phrase.as_deref(), "phrase")
    }
}

/// A condition a redirect rule matches queries on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedirectMatch {
    /// `EXACT`, `PHRASE` or `UNORDERED`
    pub match_type: String,
    pub pattern: String,
}

/// Sends matching queries to a fixed URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedirectRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<RedirectMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_segments: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedirectRuleList {
    #[serde(default)]
    pub redirect_rules: Vec<RedirectRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle state of a redirect rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectRuleStatus {
    Current,
    Pending,
    Expired,
}

impl FromStr for RedirectRuleStatus {
    type Err = ClientError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "current" => Ok(RedirectRuleStatus::Current),
            "pending" => Ok(RedirectRuleStatus::Pending),
            "expired" => Ok(RedirectRuleStatus::Expired),
            _ => Err(ClientError::validation(format!(
                "status must be one of `current`, `pending` or `expired`, got `{input}`"
            ))),
        }
    }
}

impl fmt::Display for RedirectRuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RedirectRuleStatus::Current => "current",
                RedirectRuleStatus::Pending => "pending",
                RedirectRuleStatus::Expired => "expired",
            }
        )
    }
}

/// Query of [`get_redirect_rules`](crate::catalog_api::redirect_rules::get_redirect_rules)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectRuleListParameters {
    pub num_results_per_page: Option<u32>,
    pub page: Option<u32>,
    /// Only rules matching this query
    pub query: Option<String>,
    pub status: Option<RedirectRuleStatus>,
}

impl RedirectRuleListParameters {
    pub fn validate(&self) -> ClientResult<()> {
        validate_positive(self.num_results_per_page, "num_results_per_page")?;
        validate_positive(self.page, "page")?;
        validate_non_empty(self.query.as_deref(), "query")
    }
}

/// CSV files of a catalog upload. At least one must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFiles {
    pub items: Option<UploadFile>,
    pub variations: Option<UploadFile>,
    pub item_groups: Option<UploadFile>,
}

impl CatalogFiles {
    pub fn is_empty(&self) -> bool {
        self.items.is_none() && self.variations.is_none() && self.item_groups.is_none()
    }
}

/// Query of a catalog upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFileParameters {
    /// Section the files are loaded into, `Products` by default
    pub section: String,
    /// Address notified when the upload has been processed
    pub notification_email: Option<String>,
    /// Process the upload even if it would remove many items
    pub force: bool,
}

impl Default for CatalogFileParameters {
    fn default() -> Self {
        CatalogFileParameters {
            section: "Products".to_string(),
            notification_email: None,
            force: false,
        }
    }
}

impl CatalogFileParameters {
    pub fn validate(&self) -> ClientResult<()> {
        validate_non_empty(Some(self.section.as_str()), "section")?;
        validate_non_empty(self.notification_email.as_deref(), "notification_email")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_item_serializes_only_set_fields() {
        let item = Item::new("Cordless Drill", "Products").with_id("10001");

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"item_name": "Cordless Drill", "section": "Products", "id": "10001"})
        );
    }

    #[test]
    fn test_item_keeps_unknown_fields() {
        let item: Item = serde_json::from_value(json!({
            "id": "1",
            "item_name": "Drill",
            "is_slotted": true
        }))
        .unwrap();

        assert_eq!(item.extra["is_slotted"], true);
        assert_eq!(serde_json::to_value(&item).unwrap()["is_slotted"], true);
    }

    #[test]
    fn test_item_requires_name_or_id() {
        assert!(Item::default().validate().is_err());
        assert!(Item::new("Drill", "Products").validate().is_ok());
        assert!(Item::default().with_id("1").validate().is_ok());
    }

    #[test]
    fn test_item_batch_validation() {
        assert!(ItemBatch::new("Products", vec![]).validate().is_err());
        assert!(ItemBatch::new("", vec![Item::new("Drill", "Products")])
            .validate()
            .is_err());
        assert!(ItemBatch::new("Products", vec![Item::new("Drill", "Products")])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_one_way_synonym_body() {
        let synonym = OneWaySynonym::new(["pepper", "paprika"]);

        assert_eq!(
            serde_json::to_value(&synonym).unwrap(),
            json!({"child_phrases": [{"phrase": "pepper"}, {"phrase": "paprika"}]})
        );
    }

    #[test]
    fn test_redirect_rule_status() {
        assert_eq!(
            "pending".parse::<RedirectRuleStatus>().unwrap(),
            RedirectRuleStatus::Pending
        );
        assert_eq!(RedirectRuleStatus::Expired.to_string(), "expired");
        assert!("active".parse::<RedirectRuleStatus>().is_err());
    }

    #[test]
    fn test_catalog_file_parameters_default_section() {
        let parameters = CatalogFileParameters::default();
        assert_eq!(parameters.section, "Products");
        assert!(!parameters.force);
        assert!(CatalogFiles::default().is_empty());
    }

    #[test]
    fn test_synonym_group_validation() {
        assert!(SynonymGroup::new(["0% finance", "zero percent"]).validate().is_ok());
        assert!(SynonymGroup::new(Vec::<String>::new()).validate().is_err());
        assert!(SynonymGroup::new(["", "x"]).validate().is_err());
    }
}
