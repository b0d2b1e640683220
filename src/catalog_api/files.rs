//! Bulk catalog uploads from CSV files.

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::catalog_api::endpoint::{catalog_query, catalog_url, send_write, ApiVersion};
use crate::catalog_api::models::{CatalogFileParameters, CatalogFiles};
use crate::client::BaseClient;
use crate::error::{ClientError, ClientResult};
use crate::file::UploadFile;
use crate::query::insert_if_some;
use crate::request::RequestType;

/// Replaces the whole catalog of a section with the uploaded files.
///
/// Items missing from the files are removed from the index.
pub async fn replace_catalog(
    client: &BaseClient,
    files: &CatalogFiles,
    parameters: &CatalogFileParameters,
) -> ClientResult<Option<Value>> {
    upload(client, Method::PUT, files, parameters, "replaceCatalog").await
}

/// Adds and updates the items of the uploaded files, leaving the rest untouched
pub async fn update_catalog(
    client: &BaseClient,
    files: &CatalogFiles,
    parameters: &CatalogFileParameters,
) -> ClientResult<Option<Value>> {
    upload(client, Method::PATCH, files, parameters, "updateCatalog").await
}

async fn upload(
    client: &BaseClient,
    method: Method,
    files: &CatalogFiles,
    parameters: &CatalogFileParameters,
    operation: &str,
) -> ClientResult<Option<Value>> {
    parameters.validate()?;
    let context = catalog_form(files)?;

    let mut query = catalog_query(client, true);
    query.insert("section", &parameters.section);
    insert_if_some!(query, "notification_email" => parameters.notification_email);
    if parameters.force {
        query.insert("force", 1);
    }

    let url = catalog_url(client, ApiVersion::V1, &["catalog"], query)?;
    send_write(client, method, url, context, operation).await
}

// Every part is named after its slot, whatever the file was called on disk
fn catalog_form(files: &CatalogFiles) -> ClientResult<RequestType> {
    if files.is_empty() {
        return Err(ClientError::validation(
            r#"At least one file of "items", "variations", "item_groups" is required to be in form-data"#,
        ));
    }

    let parts = [
        ("items", &files.items),
        ("variations", &files.variations),
        ("item_groups", &files.item_groups),
    ];

    let files: BTreeMap<String, UploadFile> = parts
        .into_iter()
        .filter_map(|(part, file)| {
            file.as_ref().map(|file| {
                debug!(part, size = file.size(), "Attaching catalog file");
                (part.to_string(), file.clone().renamed(format!("{part}.csv")))
            })
        })
        .collect();

    Ok(RequestType::Multipart {
        bodies: BTreeMap::new(),
        files,
    })
}
