use reqwest::Method;
use serde_json::Value;

use crate::catalog_api::endpoint::{catalog_query, catalog_url, send_read, send_write, ApiVersion};
use crate::catalog_api::models::{SynonymGroup, SynonymGroupList, SynonymListParameters};
use crate::client::BaseClient;
use crate::error::ClientResult;
use crate::query::insert_if_some;
use crate::request::RequestType;

const PATH: &str = "synonym_groups";

/// Adds a group of equivalent phrases.
///
/// The response carries the id assigned to the new group.
pub async fn add_synonym_group(
    client: &BaseClient,
    group: &SynonymGroup,
) -> ClientResult<Option<Value>> {
    group.validate()?;
    let url = catalog_url(client, ApiVersion::V1, &[PATH], catalog_query(client, true))?;
    send_write(client, Method::POST, url, RequestType::json(group)?, "addSynonymGroup").await
}

/// Replaces the phrases of an existing group
pub async fn modify_synonym_group(
    client: &BaseClient,
    group_id: u64,
    group: &SynonymGroup,
) -> ClientResult<Option<Value>> {
    group.validate()?;
    let id = group_id.to_string();
    let url = catalog_url(client, ApiVersion::V1, &[PATH, id.as_str()], catalog_query(client, true))?;
    send_write(
        client,
        Method::PUT,
        url,
        RequestType::json(group)?,
        "modifySynonymGroup",
    )
    .await
}

pub async fn get_synonym_groups(
    client: &BaseClient,
    parameters: &SynonymListParameters,
) -> ClientResult<SynonymGroupList> {
    parameters.validate()?;

    let mut query = catalog_query(client, false);
    insert_if_some!(query,
        "num_results_per_page" => parameters.num_results_per_page,
        "phrase" => parameters.phrase,
        "page" => parameters.page,
    );

    let url = catalog_url(client, ApiVersion::V1, &[PATH], query)?;
    send_read(client, url, "getSynonymGroups").await
}

pub async fn get_synonym_group(
    client: &BaseClient,
    group_id: u64,
) -> ClientResult<SynonymGroupList> {
    let id = group_id.to_string();
    let url = catalog_url(client, ApiVersion::V1, &[PATH, id.as_str()], catalog_query(client, false))?;
    send_read(client, url, "getSynonymGroup").await
}

/// Removes every synonym group of the index
pub async fn remove_synonym_groups(client: &BaseClient) -> ClientResult<Option<Value>> {
    let url = catalog_url(client, ApiVersion::V1, &[PATH], catalog_query(client, true))?;
    send_write(
        client,
        Method::DELETE,
        url,
        RequestType::Plain,
        "removeSynonymGroups",
    )
    .await
}

pub async fn remove_synonym_group(
    client: &BaseClient,
    group_id: u64,
) -> ClientResult<Option<Value>> {
    let id = group_id.to_string();
    let url = catalog_url(client, ApiVersion::V1, &[PATH, id.as_str()], catalog_query(client, true))?;
    send_write(
        client,
        Method::DELETE,
        url,
        RequestType::Plain,
        "removeSynonymGroup",
    )
    .await
}
