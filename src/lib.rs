//! A Rust client for the Constructor.io search and catalog APIs.
//!
//! This library covers the query side of an index (search, browse,
//! autocomplete and recommendations) as well as catalog management (items,
//! item groups, synonyms, redirect rules and CSV uploads). Every call is an
//! `async fn` taking a [`BaseClient`](client::BaseClient) and returning a
//! [`ClientResult`](error::ClientResult).

#![warn(unused_crate_dependencies)]

/// Client functionality and response evaluation
pub mod client;

/// Client options and per-call user overrides
pub mod config;

/// Error types
pub mod error;

/// Files sent in multipart uploads
pub mod file;

/// Header derivation
pub mod headers;

/// Stamping of `result_id` onto response items
pub mod normalize;

/// Parameters shared by search and browse
pub mod parameters;

/// Query string building
pub mod query;

/// Types for making requests
pub mod request;

/// Types for handling responses
pub mod response;

/// Pluggable HTTP transport
pub mod transport;

/// Parameter validation
pub mod validation;

/// Search API functionality
pub mod search_api {
    pub use search::get_search_results;

    /// Search command line arguments
    pub mod query;
    /// Search execution
    pub mod search;
}

/// Browse API functionality
pub mod browse_api {
    pub use browse::get_browse_results;

    /// Browse execution
    pub mod browse;
}

/// Autocomplete API functionality
pub mod autocomplete_api {
    pub use autocomplete::get_autocomplete_results;
    pub use query::AutocompleteParameters;

    /// Autocomplete execution
    pub mod autocomplete;
    /// Autocomplete parameters
    pub mod query;
}

/// Recommendations API functionality
pub mod recommendations_api {
    pub use query::RecommendationsParameters;
    pub use recommendations::get_recommendations;

    /// Recommendations parameters
    pub mod query;
    /// Recommendations execution
    pub mod recommendations;
}

/// Catalog management functionality
pub mod catalog_api {
    pub use files::{replace_catalog, update_catalog};
    pub use item_groups::{
        add_item_groups, add_or_update_item_groups, get_item_group, modify_item_group,
        remove_item_groups,
    };
    pub use items::{
        add_item, add_item_batch, add_or_update_item, add_or_update_item_batch, get_item,
        get_items, modify_item, remove_item, remove_item_batch,
    };
    pub use one_way_synonyms::{
        add_one_way_synonym, get_one_way_synonym, get_one_way_synonyms, modify_one_way_synonym,
        remove_one_way_synonym, remove_one_way_synonyms,
    };
    pub use redirect_rules::{
        add_redirect_rule, get_redirect_rule, get_redirect_rules, modify_redirect_rule,
        remove_redirect_rule, update_redirect_rule,
    };
    pub use synonym_groups::{
        add_synonym_group, get_synonym_group, get_synonym_groups, modify_synonym_group,
        remove_synonym_group, remove_synonym_groups,
    };

    /// Shared URL and dispatch plumbing
    pub(crate) mod endpoint;
    /// CSV catalog uploads
    pub mod files;
    /// Item group operations
    pub mod item_groups;
    /// Item and item batch operations
    pub mod items;
    /// Request and response bodies
    pub mod models;
    /// One-way synonym operations
    pub mod one_way_synonyms;
    /// Redirect rule operations
    pub mod redirect_rules;
    /// Synonym group operations
    pub mod synonym_groups;
}

/// Commonly used types and functions
pub mod prelude {
    pub use super::autocomplete_api::{get_autocomplete_results, AutocompleteParameters};
    pub use super::browse_api::get_browse_results;
    pub use super::catalog_api;
    pub use super::catalog_api::models::*;
    pub use super::client::BaseClient;
    pub use super::config::{ClientOptions, ClientOptionsUpdate, UserParameters};
    pub use super::error::{ClientError, ClientResult};
    pub use super::file::UploadFile;
    pub use super::parameters::{Filters, FmtOptions, GroupsStart, ResultParameters, SortOrder};
    pub use super::recommendations_api::{get_recommendations, RecommendationsParameters};
    pub use super::response::{AutocompleteResponse, Redirect, ResultItem, ResultsResponse};
    pub use super::search_api::get_search_results;
    pub use super::transport::{Transport, TransportRequest, TransportResponse};
}

/// Command-line interface functionality
pub mod cli {
    /// Arguments shared by the query commands
    pub mod args;
    /// Authentication profiles
    pub mod auth;
    /// Autocomplete command
    pub mod autocomplete;
    /// Base CLI functionality
    pub mod base;
    /// Browse command
    pub mod browse;
    /// Catalog management commands
    pub mod catalog;
    /// Recommendations command
    pub mod recommendations;
}

/// Test utilities
#[cfg(test)]
mod test_utils;
