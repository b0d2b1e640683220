use reqwest::Method;
use serde_json::Value;

use crate::catalog_api::endpoint::{catalog_query, catalog_url, send_read, send_write, ApiVersion};
use crate::catalog_api::models::{ItemGroupUpdate, ItemGroups};
use crate::client::BaseClient;
use crate::error::ClientResult;
use crate::request::RequestType;
use crate::validation::validate_term;

/// Adds item groups to the index
pub async fn add_item_groups(
    client: &BaseClient,
    groups: &ItemGroups,
) -> ClientResult<Option<Value>> {
    groups.validate()?;
    let url = catalog_url(
        client,
        ApiVersion::V1,
        &["item_groups"],
        catalog_query(client, true),
    )?;
    send_write(client, Method::POST, url, RequestType::json(groups)?, "addItemGroups").await
}

/// Retrieves a single item group, including its children
pub async fn get_item_group(client: &BaseClient, group_id: &str) -> ClientResult<Value> {
    validate_term(group_id, "id")?;
    let url = catalog_url(
        client,
        ApiVersion::V1,
        &["item_groups", group_id],
        catalog_query(client, true),
    )?;
    send_read(client, url, "getItemGroup").await
}

/// Adds item groups, replacing the ones that already exist
pub async fn add_or_update_item_groups(
    client: &BaseClient,
    groups: &ItemGroups,
) -> ClientResult<Option<Value>> {
    groups.validate()?;

    let mut query = catalog_query(client, true);
    query.insert("force", 1);

    let url = catalog_url(client, ApiVersion::V1, &["item_groups"], query)?;
    send_write(
        client,
        Method::PATCH,
        url,
        RequestType::json(groups)?,
        "addOrUpdateItemGroups",
    )
    .await
}

/// Replaces the fields of one item group. The id travels in the path only.
pub async fn modify_item_group(
    client: &BaseClient,
    group_id: &str,
    update: &ItemGroupUpdate,
) -> ClientResult<Option<Value>> {
    validate_term(group_id, "id")?;
    let url = catalog_url(
        client,
        ApiVersion::V1,
        &["item_groups", group_id],
        catalog_query(client, true),
    )?;
    send_write(
        client,
        Method::PUT,
        url,
        RequestType::json(update)?,
        "modifyItemGroup",
    )
    .await
}

/// Removes every item group of the index
pub async fn remove_item_groups(client: &BaseClient) -> ClientResult<Option<Value>> {
    let url = catalog_url(
        client,
        ApiVersion::V1,
        &["item_groups"],
        catalog_query(client, true),
    )?;
    send_write(client, Method::DELETE, url, RequestType::Plain, "removeItemGroups").await
}
