//! Request header assembly.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};

use crate::config::{ClientOptions, UserParameters};
use crate::error::{ClientError, ClientResult};

pub const SECURITY_TOKEN_HEADER: &str = "x-cnstrc-token";
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Builds the optional headers of a search-side call.
///
/// Each header is only present when its source value is present and not
/// empty: `x-cnstrc-token` from the configured security token,
/// `X-Forwarded-For` from the caller's IP and `User-Agent` from the caller's
/// user agent.
pub fn build_headers(options: &ClientOptions, user: &UserParameters) -> ClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    insert_optional(
        &mut headers,
        HeaderName::from_static(SECURITY_TOKEN_HEADER),
        options.security_token.as_deref(),
    )?;
    insert_optional(
        &mut headers,
        HeaderName::from_static(FORWARDED_FOR_HEADER),
        user.user_ip.as_deref(),
    )?;
    insert_optional(&mut headers, USER_AGENT, user.user_agent.as_deref())?;

    Ok(headers)
}

/// Builds the headers of a catalog call, which authenticate with the API token
pub fn catalog_headers(options: &ClientOptions) -> ClientResult<HeaderMap> {
    let token = options
        .api_token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ClientError::validation("API token is required for catalog management requests")
        })?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, header_value(&basic_auth_value(token), "Authorization")?);

    insert_optional(
        &mut headers,
        HeaderName::from_static(SECURITY_TOKEN_HEADER),
        options.security_token.as_deref(),
    )?;

    Ok(headers)
}

/// `Basic base64(<token>:)`
pub fn basic_auth_value(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{token}:")))
}

fn insert_optional(
    headers: &mut HeaderMap,
    name: HeaderName,
    value: Option<&str>,
) -> ClientResult<()> {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        let value = header_value(value, name.as_str())?;
        headers.insert(name, value);
    }
    Ok(())
}

fn header_value(value: &str, name: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ClientError::validation(format!("{name} is not a valid header value")))
}
