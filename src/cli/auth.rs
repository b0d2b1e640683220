//! Authentication profiles of the ciocli command line interface
//!
//! A profile bundles the service URL, the API key and the optional API
//! token of one index. Profiles are stored in the system keyring and
//! selected with `--profile <name>`.

use std::io::{self, Write};

use colored::Colorize;
use dialoguer::Input;
use keyring::Entry;
use rpassword::prompt_password;
use serde::{Deserialize, Serialize};
use structopt::StructOpt;
use url::Url;

use crate::config::{ClientOptions, DEFAULT_SERVICE_URL};

/// Keyring service all profiles are stored under
const KEYRING_SERVICE: &str = "ciocli";

type BoxResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Interactively prompts for the service URL, API key and API token
///
/// # Returns
/// A tuple `(url, api_key, api_token)`. The token is empty if the user skips it.
pub fn prompt_for_credentials() -> BoxResult<(String, String, String)> {
    println!("\n{}", "🔗 Setting up index connection...".bold().cyan());
    println!("{}", "─".repeat(50).dimmed());

    let service_url: String = Input::new()
        .with_prompt(format!(
            "{} {}",
            "🌐".bold(),
            "Enter service URL".bold().green()
        ))
        .default(DEFAULT_SERVICE_URL.to_string())
        .show_default(true)
        .interact_text()?;

    let api_key: String = Input::new()
        .with_prompt(format!("{} {}", "🔑".bold(), "Enter API key".bold().green()))
        .interact_text()?;

    println!(
        "\n{} {}",
        "🔒".bold(),
        "Enter API token (optional - needed for catalog commands)"
            .bold()
            .green()
    );
    println!("{}", "   Token will be hidden for security".dimmed());
    print!("{} ", "Token:".bold().yellow());
    io::stdout().flush()?;
    let api_token = prompt_password("")?;

    if !api_token.trim().is_empty() {
        println!("{}", "✓ Token received".green());
    } else {
        println!(
            "{}",
            "⚠ No token provided - catalog commands will be unavailable".yellow()
        );
    }

    println!("{}", "─".repeat(50).dimmed());
    Ok((service_url, api_key, api_token))
}

/// Subcommands for handling authentication profiles
#[derive(StructOpt, Debug)]
#[structopt(about = "Handle authentication profiles of ciocli")]
pub enum AuthSubCommand {
    /// Set an authentication profile
    #[structopt(about = "Set the authentication profile")]
    Set {
        #[structopt(short, long, help = "Name of the profile")]
        name: Option<String>,

        #[structopt(short, long, help = "Service URL, defaults to the public API")]
        url: Option<String>,

        #[structopt(short = "k", long, help = "API key of the index")]
        api_key: Option<String>,

        #[structopt(short, long, help = "API token for catalog management")]
        token: Option<String>,
    },
}

impl AuthSubCommand {
    /// Stores the profile in the keyring. Needs no client.
    pub fn process(self) {
        match self {
            AuthSubCommand::Set {
                name,
                url,
                api_key,
                token,
            } => {
                let profile_name = match get_profile_name(name) {
                    Ok(name) => name,
                    Err(e) => {
                        println!(
                            "{} Failed to get profile name: {}",
                            "❌".bold(),
                            e.to_string().red()
                        );
                        return;
                    }
                };

                let (url, api_key, token) = match get_credentials(url, api_key, token) {
                    Ok(credentials) => credentials,
                    Err(e) => {
                        println!(
                            "{} Failed to get credentials: {}",
                            "❌".bold(),
                            e.to_string().red()
                        );
                        return;
                    }
                };

                create_and_store_profile(profile_name, url, api_key, token);
            }
        }
    }
}

fn get_profile_name(name: Option<String>) -> BoxResult<String> {
    if let Some(profile_name) = name {
        return Ok(profile_name);
    }

    println!("\n{}", "📝 Profile Setup".bold().cyan());
    println!("{}", "─".repeat(30).dimmed());

    Input::new()
        .with_prompt(format!(
            "{} {}",
            "👤".bold(),
            "Enter profile name".bold().green()
        ))
        .interact_text()
        .map_err(Into::into)
}

/// Uses the provided values, prompting only when the API key is missing
fn get_credentials(
    url: Option<String>,
    api_key: Option<String>,
    token: Option<String>,
) -> BoxResult<(String, String, String)> {
    match api_key {
        Some(api_key) => Ok((
            url.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
            api_key,
            token.unwrap_or_default(),
        )),
        None => {
            let (prompted_url, prompted_key, prompted_token) = prompt_for_credentials()?;
            Ok((
                url.unwrap_or(prompted_url),
                prompted_key,
                token.unwrap_or(prompted_token),
            ))
        }
    }
}

fn create_and_store_profile(name: String, url: String, api_key: String, token: String) {
    println!("\n{}", "💾 Saving profile...".bold().cyan());

    let token = Some(token).filter(|token| !token.trim().is_empty());

    match AuthProfile::new(name.clone(), url, api_key, token) {
        Ok(profile) => match profile.set_to_keyring() {
            Ok(_) => {
                println!("{}", "─".repeat(50).dimmed());
                println!(
                    "{} Profile '{}' saved successfully!",
                    "✅".bold(),
                    name.bold().green()
                );
                println!(
                    "   You can now use it with: {}",
                    format!("--profile {}", name).dimmed().italic()
                );
                println!("{}", "─".repeat(50).dimmed());
            }
            Err(e) => {
                println!(
                    "{} Failed to save profile to keyring: {}",
                    "❌".bold(),
                    e.to_string().red()
                );
            }
        },
        Err(e) => {
            println!("{} Failed to create profile: {}", "❌".bold(), e.red());
        }
    }
}

/// Named credentials of one index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthProfile {
    name: String,
    service_url: String,
    api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_token: Option<String>,
}

impl AuthProfile {
    /// Creates a profile, checking the URL and the API key
    pub fn new(
        name: String,
        service_url: String,
        api_key: String,
        api_token: Option<String>,
    ) -> Result<Self, String> {
        Url::parse(&service_url).map_err(|_| "Invalid URL format".to_string())?;

        if api_key.trim().is_empty() {
            return Err("API key must not be empty".to_string());
        }

        Ok(AuthProfile {
            name,
            service_url,
            api_key,
            api_token,
        })
    }

    /// Stores the profile as JSON under its name
    pub fn set_to_keyring(&self) -> BoxResult<()> {
        let entry = Entry::new(KEYRING_SERVICE, &self.name)?;
        entry.set_password(&serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn get_from_keyring(name: &str) -> BoxResult<Self> {
        let entry = Entry::new(KEYRING_SERVICE, name)?;
        let stored = entry.get_password()?;
        Ok(serde_json::from_str(&stored)?)
    }

    /// Client options for this profile.
    ///
    /// Identity fields are taken from the `CIO_*` environment when set.
    pub fn to_options(&self) -> ClientOptions {
        let client_id = std::env::var("CIO_CLIENT_ID")
            .unwrap_or_else(|_| uuid::Uuid::new_v4().to_string());
        let session_id = std::env::var("CIO_SESSION_ID").unwrap_or_else(|_| "1".to_string());

        let options = ClientOptions::new(self.api_key.clone(), client_id, session_id)
            .with_service_url(self.service_url.clone());

        match &self.api_token {
            Some(token) => options.with_api_token(token.clone()),
            None => options,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_url(&self) -> &str {
        &self.service_url
    }
}
