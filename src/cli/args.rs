//! Arguments shared by the query subcommands.

use std::error::Error;
use std::path::PathBuf;

use serde_json::{Map, Value};
use structopt::StructOpt;

use crate::config::UserParameters;
use crate::parameters::{ResultParameters, SortOrder};
use crate::validation::expect_fmt_options;

use super::base::{collect_filters, parse_file, parse_key_value};

/// Paging, filtering and sorting of search and browse results
#[derive(StructOpt, Debug, Default)]
pub struct ResultArgs {
    #[structopt(long, help = "Index section to query, e.g. Products")]
    pub section: Option<String>,

    #[structopt(long, help = "Page of results to return")]
    pub page: Option<u32>,

    #[structopt(long, help = "Number of results per page")]
    pub results_per_page: Option<u32>,

    #[structopt(
        long = "filter",
        parse(try_from_str = parse_key_value),
        help = "Facet filter as facet=value, can be repeated"
    )]
    pub filters: Vec<(String, String)>,

    #[structopt(long, help = "Field to sort by")]
    pub sort_by: Option<String>,

    #[structopt(long, help = "Sort order (ascending, descending)")]
    pub sort_order: Option<SortOrder>,

    #[structopt(
        long = "fmt-option",
        parse(try_from_str = parse_key_value),
        help = "Format option as key=value (groups_max_depth, groups_start)"
    )]
    pub fmt_options: Vec<(String, String)>,

    #[structopt(long, help = "Collection to browse within")]
    pub collection_id: Option<String>,

    #[structopt(
        long,
        help = "Path to a JSON/YAML file with parameters; flags take precedence"
    )]
    pub params: Option<PathBuf>,
}

impl ResultArgs {
    /// Merges the parameter file (if any) with the flags and validates the result
    pub fn into_parameters(self) -> Result<ResultParameters, Box<dyn Error>> {
        let mut parameters = match &self.params {
            Some(path) => {
                let value: Value = parse_file(path)?;
                ResultParameters::from_value(&value)?
            }
            None => ResultParameters::default(),
        };

        if self.section.is_some() {
            parameters.section = self.section;
        }
        if self.page.is_some() {
            parameters.page = self.page;
        }
        if self.results_per_page.is_some() {
            parameters.results_per_page = self.results_per_page;
        }
        if self.sort_by.is_some() {
            parameters.sort_by = self.sort_by;
        }
        if self.sort_order.is_some() {
            parameters.sort_order = self.sort_order;
        }
        if self.collection_id.is_some() {
            parameters.collection_id = self.collection_id;
        }
        if !self.filters.is_empty() {
            parameters.filters = collect_filters(&self.filters);
        }
        if !self.fmt_options.is_empty() {
            let options: Map<String, Value> = self
                .fmt_options
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            parameters.fmt_options = expect_fmt_options(&Value::Object(options))?;
        }

        parameters.validate()?;
        Ok(parameters)
    }
}

/// Per-call identity of the end user
#[derive(StructOpt, Debug, Default)]
pub struct UserArgs {
    #[structopt(long, help = "IP address of the end user, sent as X-Forwarded-For")]
    pub user_ip: Option<String>,

    #[structopt(long, help = "User agent of the end user")]
    pub user_agent: Option<String>,

    #[structopt(long, help = "Overrides the configured user id")]
    pub user_id: Option<String>,

    #[structopt(long, help = "Overrides the configured session id")]
    pub session_id: Option<String>,

    #[structopt(long = "segment", help = "User segment, can be repeated")]
    pub segments: Vec<String>,
}

impl From<UserArgs> for UserParameters {
    fn from(args: UserArgs) -> Self {
        UserParameters {
            user_ip: args.user_ip,
            user_agent: args.user_agent,
            user_id: args.user_id,
            session_id: args.session_id,
            segments: Some(args.segments).filter(|segments| !segments.is_empty()),
            ..Default::default()
        }
    }
}
