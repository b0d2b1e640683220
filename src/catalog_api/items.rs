use reqwest::Method;
use serde_json::Value;

use crate::catalog_api::endpoint::{catalog_query, catalog_url, send_read, send_write, ApiVersion};
use crate::catalog_api::models::{Item, ItemBatch, ItemList, ItemListParameters};
use crate::client::BaseClient;
use crate::error::ClientResult;
use crate::query::insert_if_some;
use crate::request::RequestType;
use crate::validation::validate_term;

/// Adds an item to the index
pub async fn add_item(client: &BaseClient, item: &Item) -> ClientResult<Option<Value>> {
    item.validate()?;
    let url = catalog_url(client, ApiVersion::V1, &["item"], catalog_query(client, true))?;
    send_write(client, Method::POST, url, RequestType::json(item)?, "addItem").await
}

/// Adds an item, or replaces it if it already exists
pub async fn add_or_update_item(client: &BaseClient, item: &Item) -> ClientResult<Option<Value>> {
    item.validate()?;

    let mut query = catalog_query(client, true);
    query.insert("force", 1);

    let url = catalog_url(client, ApiVersion::V1, &["item"], query)?;
    send_write(client, Method::PUT, url, RequestType::json(item)?, "addOrUpdateItem").await
}

/// Removes an item, addressed by name or id
pub async fn remove_item(client: &BaseClient, item: &Item) -> ClientResult<Option<Value>> {
    item.validate()?;
    let url = catalog_url(client, ApiVersion::V1, &["item"], catalog_query(client, true))?;
    send_write(client, Method::DELETE, url, RequestType::json(item)?, "removeItem").await
}

/// Modifies an existing item.
///
/// A rename is expressed with a `new_item_name` entry in [`Item::extra`].
pub async fn modify_item(client: &BaseClient, item: &Item) -> ClientResult<Option<Value>> {
    item.validate()?;
    let url = catalog_url(client, ApiVersion::V1, &["item"], catalog_query(client, true))?;
    send_write(client, Method::PUT, url, RequestType::json(item)?, "modifyItem").await
}

/// Adds up to 1000 items
pub async fn add_item_batch(client: &BaseClient, batch: &ItemBatch) -> ClientResult<Option<Value>> {
    batch.validate()?;
    let url = catalog_url(
        client,
        ApiVersion::V1,
        &["batch_items"],
        catalog_query(client, true),
    )?;
    send_write(client, Method::POST, url, RequestType::json(batch)?, "addItemBatch").await
}

/// Adds up to 1000 items, replacing the ones that already exist
pub async fn add_or_update_item_batch(
    client: &BaseClient,
    batch: &ItemBatch,
) -> ClientResult<Option<Value>> {
    batch.validate()?;

    let mut query = catalog_query(client, true);
    query.insert("force", 1);

    let url = catalog_url(client, ApiVersion::V1, &["batch_items"], query)?;
    send_write(
        client,
        Method::PUT,
        url,
        RequestType::json(batch)?,
        "addOrUpdateItemBatch",
    )
    .await
}

/// Removes up to 1000 items
pub async fn remove_item_batch(
    client: &BaseClient,
    batch: &ItemBatch,
) -> ClientResult<Option<Value>> {
    batch.validate()?;
    let url = catalog_url(
        client,
        ApiVersion::V1,
        &["batch_items"],
        catalog_query(client, true),
    )?;
    send_write(
        client,
        Method::DELETE,
        url,
        RequestType::json(batch)?,
        "removeItemBatch",
    )
    .await
}

/// Lists the items of the index, a page at a time
pub async fn get_items(
    client: &BaseClient,
    parameters: &ItemListParameters,
) -> ClientResult<ItemList> {
    parameters.validate()?;
    let url = catalog_url(
        client,
        ApiVersion::V1,
        &["item"],
        item_list_query(client, parameters),
    )?;
    send_read(client, url, "getItems").await
}

/// Retrieves a single item by id
pub async fn get_item(
    client: &BaseClient,
    item_id: &str,
    parameters: &ItemListParameters,
) -> ClientResult<Item> {
    validate_term(item_id, "item_id")?;
    parameters.validate()?;
    let url = catalog_url(
        client,
        ApiVersion::V1,
        &["item", item_id],
        item_list_query(client, parameters),
    )?;
    send_read(client, url, "getItem").await
}

fn item_list_query(
    client: &BaseClient,
    parameters: &ItemListParameters,
) -> crate::query::QueryBuilder {
    let mut query = catalog_query(client, true);
    insert_if_some!(query,
        "num_results_per_page" => parameters.num_results_per_page,
        "page" => parameters.page,
        "section" => parameters.section,
    );
    query
}
