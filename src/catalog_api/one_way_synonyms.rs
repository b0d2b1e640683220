use reqwest::Method;
use serde_json::Value;

use crate::catalog_api::endpoint::{catalog_query, catalog_url, send_read, send_write, ApiVersion};
use crate::catalog_api::models::{OneWaySynonym, OneWaySynonymList, SynonymListParameters};
use crate::client::BaseClient;
use crate::error::ClientResult;
use crate::query::insert_if_some;
use crate::request::RequestType;
use crate::validation::validate_term;

const PATH: &str = "one_way_synonyms";

/// Adds a one-way synonym expanding `phrase` into the given child phrases
pub async fn add_one_way_synonym(
    client: &BaseClient,
    phrase: &str,
    synonym: &OneWaySynonym,
) -> ClientResult<Option<Value>> {
    validate_term(phrase, "phrase")?;
    let url = catalog_url(client, ApiVersion::V2, &[PATH, phrase], catalog_query(client, true))?;
    send_write(
        client,
        Method::POST,
        url,
        RequestType::json(synonym)?,
        "addOneWaySynonym",
    )
    .await
}

/// Replaces the child phrases of an existing one-way synonym
pub async fn modify_one_way_synonym(
    client: &BaseClient,
    phrase: &str,
    synonym: &OneWaySynonym,
) -> ClientResult<Option<Value>> {
    validate_term(phrase, "phrase")?;
    let url = catalog_url(client, ApiVersion::V2, &[PATH, phrase], catalog_query(client, true))?;
    send_write(
        client,
        Method::PUT,
        url,
        RequestType::json(synonym)?,
        "modifyOneWaySynonym",
    )
    .await
}

pub async fn get_one_way_synonym(client: &BaseClient, phrase: &str) -> ClientResult<Value> {
    validate_term(phrase, "phrase")?;
    let url = catalog_url(client, ApiVersion::V2, &[PATH, phrase], catalog_query(client, true))?;
    send_read(client, url, "getOneWaySynonym").await
}

/// Lists one-way synonyms, optionally only those containing a phrase
pub async fn get_one_way_synonyms(
    client: &BaseClient,
    parameters: &SynonymListParameters,
) -> ClientResult<OneWaySynonymList> {
    parameters.validate()?;

    let mut query = catalog_query(client, true);
    insert_if_some!(query,
        "num_results_per_page" => parameters.num_results_per_page,
        "phrase" => parameters.phrase,
        "page" => parameters.page,
    );

    let url = catalog_url(client, ApiVersion::V2, &[PATH], query)?;
    send_read(client, url, "getOneWaySynonyms").await
}

pub async fn remove_one_way_synonym(
    client: &BaseClient,
    phrase: &str,
) -> ClientResult<Option<Value>> {
    validate_term(phrase, "phrase")?;
    let url = catalog_url(client, ApiVersion::V2, &[PATH, phrase], catalog_query(client, true))?;
    send_write(
        client,
        Method::DELETE,
        url,
        RequestType::Plain,
        "removeOneWaySynonym",
    )
    .await
}

/// Removes every one-way synonym of the index
pub async fn remove_one_way_synonyms(client: &BaseClient) -> ClientResult<Option<Value>> {
    let url = catalog_url(client, ApiVersion::V2, &[PATH], catalog_query(client, true))?;
    send_write(
        client,
        Method::DELETE,
        url,
        RequestType::Plain,
        "removeOneWaySynonyms",
    )
    .await
}
