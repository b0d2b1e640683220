use reqwest::Method;
use serde_json::{json, Value};

use crate::catalog_api::endpoint::{catalog_query, catalog_url, send_read, send_write, ApiVersion};
use crate::catalog_api::models::{RedirectRule, RedirectRuleList, RedirectRuleListParameters};
use crate::client::BaseClient;
use crate::error::{ClientError, ClientResult};
use crate::query::insert_if_some;
use crate::request::RequestType;
use crate::validation::validate_term;

const PATH: &str = "redirect_rules";

/// Adds a rule sending matching queries to a URL
pub async fn add_redirect_rule(
    client: &BaseClient,
    rule: &RedirectRule,
) -> ClientResult<Option<Value>> {
    validate_rule(rule)?;
    let url = catalog_url(client, ApiVersion::V1, &[PATH], catalog_query(client, true))?;
    send_write(client, Method::POST, url, RequestType::json(rule)?, "addRedirectRule").await
}

/// Replaces an existing rule as a whole
pub async fn modify_redirect_rule(
    client: &BaseClient,
    rule_id: &str,
    rule: &RedirectRule,
) -> ClientResult<Option<Value>> {
    validate_term(rule_id, "id")?;
    validate_rule(rule)?;
    let url = catalog_url(client, ApiVersion::V1, &[PATH, rule_id], catalog_query(client, true))?;
    send_write(
        client,
        Method::PUT,
        url,
        RequestType::json(rule)?,
        "modifyRedirectRule",
    )
    .await
}

/// Changes only the fields set on `rule`
pub async fn update_redirect_rule(
    client: &BaseClient,
    rule_id: &str,
    rule: &RedirectRule,
) -> ClientResult<Option<Value>> {
    validate_term(rule_id, "id")?;
    let url = catalog_url(client, ApiVersion::V1, &[PATH, rule_id], catalog_query(client, true))?;
    send_write(
        client,
        Method::PATCH,
        url,
        RequestType::json(rule)?,
        "updateRedirectRule",
    )
    .await
}

pub async fn get_redirect_rules(
    client: &BaseClient,
    parameters: &RedirectRuleListParameters,
) -> ClientResult<RedirectRuleList> {
    parameters.validate()?;

    let mut query = catalog_query(client, false);
    insert_if_some!(query,
        "num_results_per_page" => parameters.num_results_per_page,
        "page" => parameters.page,
        "query" => parameters.query,
        "status" => parameters.status,
    );

    let url = catalog_url(client, ApiVersion::V1, &[PATH], query)?;
    send_read(client, url, "getRedirectRules").await
}

pub async fn get_redirect_rule(client: &BaseClient, rule_id: &str) -> ClientResult<RedirectRule> {
    validate_term(rule_id, "id")?;
    let url = catalog_url(client, ApiVersion::V1, &[PATH, rule_id], catalog_query(client, false))?;
    send_read(client, url, "getRedirectRule").await
}

/// Removes a rule; the id is sent both in the path and as `redirect_rule_id`
pub async fn remove_redirect_rule(
    client: &BaseClient,
    rule_id: &str,
) -> ClientResult<Option<Value>> {
    validate_term(rule_id, "id")?;
    let url = catalog_url(client, ApiVersion::V1, &[PATH, rule_id], catalog_query(client, true))?;
    send_write(
        client,
        Method::DELETE,
        url,
        RequestType::json(&json!({ "redirect_rule_id": rule_id }))?,
        "removeRedirectRule",
    )
    .await
}

// A full rule needs a target and at least one match
fn validate_rule(rule: &RedirectRule) -> ClientResult<()> {
    if rule.url.as_deref().map_or(true, str::is_empty) {
        return Err(ClientError::validation("url is a required parameter of type string"));
    }
    if rule.matches.is_empty() {
        return Err(ClientError::validation("matches must contain at least one match"));
    }
    Ok(())
}
