//! Query string assembly.
//!
//! A [`QueryBuilder`] keeps an ordered list of key/value pairs. Identity and
//! versioning fields come first, endpoint parameters follow in the order they
//! are inserted, and `_dt` is appended last when the query is built. Nested
//! structures are flattened with bracket keys (`filters[color]=red`) and
//! lists become repeated keys (`us=a&us=b`).

use std::time::{SystemTime, UNIX_EPOCH};

use url::form_urlencoded;

use crate::config::Identity;
use crate::parameters::{Filters, FmtOptions};

/// Inserts each `"key" => option` pair whose option is `Some`.
macro_rules! insert_if_some {
    ($query:expr, $($key:literal => $value:expr),+ $(,)?) => {
        $(
            if let Some(value) = &$value {
                $query.insert($key, value);
            }
        )+
    };
}

pub(crate) use insert_if_some;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a query with the client version and API key
    pub fn with_credentials(version: &str, api_key: &str) -> Self {
        let mut query = Self::new();
        query.insert("c", version).insert("key", api_key);
        query
    }

    /// Starts a query with version, API key and the caller's identity
    pub fn with_identity(version: &str, api_key: &str, identity: &Identity) -> Self {
        let mut query = Self::with_credentials(version, api_key);
        query
            .insert("i", &identity.client_id)
            .insert("s", &identity.session_id);

        for (cell, value) in &identity.test_cells {
            query.insert(format!("ef-{cell}"), value);
        }

        if !identity.segments.is_empty() {
            query.insert_repeated("us", &identity.segments);
        }

        if let Some(user_id) = &identity.user_id {
            query.insert("ui", user_id);
        }

        query
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Inserts one pair per value under the same key
    pub fn insert_repeated<I, T>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        for value in values {
            self.insert(key, value);
        }
        self
    }

    /// Inserts `filters[<facet>]=<value>` for every facet value
    pub fn insert_filters(&mut self, filters: &Filters) -> &mut Self {
        for (facet, values) in filters {
            self.insert_repeated(&format!("filters[{facet}]"), values);
        }
        self
    }

    /// Inserts `fmt_options[<key>]=<value>` for every option that is set
    pub fn insert_fmt_options(&mut self, fmt_options: &FmtOptions) -> &mut Self {
        insert_if_some!(self,
            "fmt_options[groups_max_depth]" => fmt_options.groups_max_depth,
            "fmt_options[groups_start]" => fmt_options.groups_start,
        );
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Appends `_dt` with the current time and serializes the query
    pub fn build(self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.build_at(now)
    }

    /// Appends `_dt` with the given timestamp (milliseconds) and serializes
    pub fn build_at(mut self, timestamp_ms: u128) -> String {
        self.insert("_dt", timestamp_ms);
        self.serialize()
    }

    /// Serializes the pairs as they are, without a timestamp
    pub fn serialize(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }
}
