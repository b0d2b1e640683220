//! Base functionality for the ciocli command line interface
//!
//! This module provides core utilities and traits used across the CLI including:
//! - Response handling and printing
//! - Parsing of `key=value` arguments
//! - File parsing for JSON/YAML parameter files
//! - Logging setup
//! - The trait every subcommand implements

use std::error::Error;
use std::fs;
use std::path::Path;

use atty::Stream;
use colored::Colorize;
use colored_json::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use crate::client::BaseClient;
use crate::error::ClientResult;
use crate::parameters::Filters;

/// Environment variable holding the log filter, e.g. `CIO_LOG=debug`
pub const LOG_ENV: &str = "CIO_LOG";

/// Evaluates an API result, prints it and exits the process.
///
/// Successful results are printed as JSON. When stdout is a terminal the
/// JSON is colored and preceded by a success message, otherwise it is
/// printed as is so that it can be piped into other tools.
///
/// # Arguments
/// * `response` - The result of an API call
pub fn evaluate_and_print_response<T: Serialize>(response: ClientResult<T>) {
    let value = match response {
        Ok(value) => value,
        Err(err) => {
            let code = if err.is_validation() {
                exitcode::USAGE
            } else {
                exitcode::DATAERR
            };
            print_error(err.to_string());
            std::process::exit(code);
        }
    };

    match serde_json::to_string_pretty(&value) {
        Ok(json) => {
            redirect_stream(&json);
            std::process::exit(exitcode::OK);
        }
        Err(err) => {
            print_error(format!("Response could not be serialized: {err}"));
            std::process::exit(exitcode::SOFTWARE);
        }
    }
}

fn redirect_stream(json_str: &str) {
    if atty::is(Stream::Stdout) {
        println!("{}", success_message());
        match json_str.to_colored_json_auto() {
            Ok(colored) => println!("{}\n", colored),
            Err(_) => println!("{}\n", json_str),
        }
    } else {
        println!("{}", json_str);
    }
}

fn success_message() -> String {
    format!(
        "{} {} - Received the following response: \n",
        "└── ".bold(),
        "🎉 Success!".green().bold()
    )
}

/// Prints an error in the CLI's error style
pub fn print_error(error: String) {
    eprintln!("\n{} {}\n", "Error:".red().bold(), error);
}

/// Returns the value or prints the error and exits with `USAGE`
pub fn exit_on_error<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            print_error(err.to_string());
            std::process::exit(exitcode::USAGE);
        }
    }
}

/// Runs a future to completion on a fresh runtime.
///
/// Exits the process if no runtime can be created.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    match Runtime::new() {
        Ok(runtime) => runtime.block_on(future),
        Err(err) => {
            print_error(format!("Failed to start the async runtime: {err}"));
            std::process::exit(exitcode::OSERR);
        }
    }
}

/// Parses a JSON or YAML file into the specified type
///
/// # Arguments
/// * `path` - Path to the file to parse
///
/// # Returns
/// * `Ok(T)` - Successfully parsed file contents
/// * `Err` - File reading or parsing error
pub fn parse_file<P, T>(path: P) -> Result<T, Box<dyn Error>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;

    if let Ok(content) = serde_json::from_str(&content) {
        Ok(content)
    } else if let Ok(content) = serde_yaml::from_str(&content) {
        Ok(content)
    } else {
        Err("Failed to parse the file as either JSON or YAML".into())
    }
}

/// Parses a `key=value` argument. Used by structopt's `parse(try_from_str)`.
pub fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Expected `key=value`, got `{input}`")),
    }
}

/// Groups repeated `facet=value` arguments by facet
pub fn collect_filters(pairs: &[(String, String)]) -> Filters {
    let mut filters = Filters::new();
    for (facet, value) in pairs {
        filters
            .entry(facet.clone())
            .or_default()
            .push(value.clone());
    }
    filters
}

/// Installs the stderr log subscriber, filtered by [`LOG_ENV`] (default `warn`)
pub fn init_logging() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}

/// Trait for processing CLI subcommands
///
/// Implementors define how to handle their specific subcommand variant
/// using the provided API client.
pub trait Matcher {
    /// Process this subcommand using the given client
    ///
    /// # Arguments
    /// * `client` - The BaseClient for making API requests
    fn process(self, client: &BaseClient);
}
