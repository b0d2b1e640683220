//! Client configuration and per-call user identity.
//!
//! [`ClientOptions`] is validated once when a [`BaseClient`](crate::client::BaseClient)
//! is built and is only changed afterwards through
//! [`BaseClient::set_client_options`](crate::client::BaseClient::set_client_options).
//! [`UserParameters`] carries identity overrides for a single call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Service URL used when none is configured
pub const DEFAULT_SERVICE_URL: &str = "https://ac.cnstrc.com";

/// Version string reported in the `c` query parameter by default
pub fn default_version() -> String {
    format!("cio-rs-client-{}", env!("CARGO_PKG_VERSION"))
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

/// Options a client is constructed with.
///
/// Field names deserialize from camelCase (`apiKey`, `clientId`, ...) so
/// option files written for other Constructor clients can be reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
    /// Index API key, sent as `key` on every request
    pub api_key: String,

    /// Secret API token, required by catalog management calls only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Base URL of the service
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Client version string, sent as `c`
    #[serde(default = "default_version")]
    pub version: String,

    /// Client id, sent as `i`
    pub client_id: String,

    /// Session id, sent as `s`
    pub session_id: String,

    /// User id, sent as `ui`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// User segments, sent as repeated `us`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,

    /// Test cells, each sent as `ef-<name>`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub test_cells: BTreeMap<String, String>,

    /// Security token, sent as the `x-cnstrc-token` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_token: Option<String>,
}

impl ClientOptions {
    /// Creates options with the three mandatory fields and defaults for the rest
    pub fn new(
        api_key: impl Into<String>,
        client_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        ClientOptions {
            api_key: api_key.into(),
            api_token: None,
            service_url: default_service_url(),
            version: default_version(),
            client_id: client_id.into(),
            session_id: session_id.into(),
            user_id: None,
            segments: Vec::new(),
            test_cells: BTreeMap::new(),
            security_token: None,
        }
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = service_url.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// An empty user id leaves the user id unset
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = non_empty(Some(user_id.into()));
        self
    }

    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_test_cells<I, K, V>(mut self, test_cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.test_cells = test_cells
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_security_token(mut self, security_token: impl Into<String>) -> Self {
        self.security_token = Some(security_token.into());
        self
    }

    /// Reads options from `CIO_*` environment variables.
    ///
    /// `CIO_API_KEY` is required. A missing client id defaults to a random
    /// UUID and a missing session id to `"1"`. Variables set to an empty
    /// string count as unset.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let var = |name: &str| non_empty(lookup(name));

        let api_key = var("CIO_API_KEY").ok_or_else(|| {
            ClientError::validation("CIO_API_KEY must be set when no profile is given")
        })?;
        let client_id = var("CIO_CLIENT_ID").unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let session_id = var("CIO_SESSION_ID").unwrap_or_else(|| "1".to_string());

        let mut options = ClientOptions::new(api_key, client_id, session_id);

        if let Some(service_url) = var("CIO_SERVICE_URL") {
            options.service_url = service_url;
        }
        options.api_token = var("CIO_API_TOKEN");
        options.user_id = var("CIO_USER_ID");
        options.security_token = var("CIO_SECURITY_TOKEN");

        if let Some(segments) = var("CIO_SEGMENTS") {
            options.segments = split_list(&segments);
        }

        Ok(options)
    }

    /// Checks the mandatory fields and parses the service URL
    pub fn validate(&self) -> ClientResult<Url> {
        require_non_empty(&self.api_key, "API key")?;
        require_non_empty(&self.client_id, "Client ID")?;
        require_non_empty(&self.session_id, "Session ID")?;

        let url = Url::parse(&self.service_url)?;
        if url.cannot_be_a_base() {
            return Err(ClientError::validation(format!(
                "Service URL is not a valid base URL: {}",
                self.service_url
            )));
        }

        Ok(url)
    }

    /// Merges the configured identity with per-call overrides
    pub fn identity(&self, user: &UserParameters) -> Identity {
        Identity {
            client_id: user
                .client_id
                .clone()
                .unwrap_or_else(|| self.client_id.clone()),
            session_id: user
                .session_id
                .clone()
                .unwrap_or_else(|| self.session_id.clone()),
            user_id: non_empty(user.user_id.clone())
                .or_else(|| non_empty(self.user_id.clone())),
            segments: user
                .segments
                .clone()
                .unwrap_or_else(|| self.segments.clone()),
            test_cells: user
                .test_cells
                .clone()
                .unwrap_or_else(|| self.test_cells.clone()),
        }
    }
}

fn require_non_empty(value: &str, name: &str) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::validation(format!(
            "{name} is a required parameter of type string"
        )));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Subset of options that may be changed on a live client.
///
/// Only fields set to `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientOptionsUpdate {
    pub api_key: Option<String>,
    pub segments: Option<Vec<String>>,
    pub test_cells: Option<BTreeMap<String, String>>,
    pub user_id: Option<String>,
}

impl ClientOptionsUpdate {
    pub(crate) fn apply(self, options: &mut ClientOptions) -> ClientResult<()> {
        if let Some(api_key) = &self.api_key {
            require_non_empty(api_key, "API key")?;
        }

        if let Some(api_key) = self.api_key {
            options.api_key = api_key;
        }
        if let Some(segments) = self.segments {
            options.segments = segments;
        }
        if let Some(test_cells) = self.test_cells {
            options.test_cells = test_cells;
        }
        if let Some(user_id) = non_empty(self.user_id) {
            options.user_id = Some(user_id);
        }

        Ok(())
    }
}

/// Identity fields that may be overridden for a single call.
///
/// `user_ip` and `user_agent` are forwarded as headers; the rest replace the
/// matching [`ClientOptions`] field for this call only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParameters {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub segments: Option<Vec<String>>,
    #[serde(default)]
    pub test_cells: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub user_ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl UserParameters {
    pub fn validate(&self) -> ClientResult<()> {
        let fields = [
            ("sessionId", &self.session_id),
            ("clientId", &self.client_id),
            ("userId", &self.user_id),
        ];

        for (name, value) in fields {
            if let Some(value) = value {
                if value.is_empty() {
                    return Err(ClientError::validation(format!(
                        "{name} must be a non-empty string"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Effective identity of one request
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub client_id: String,
    pub session_id: String,
    pub user_id: Option<String>,
    pub segments: Vec<String>,
    pub test_cells: BTreeMap<String, String>,
}
