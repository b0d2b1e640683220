//! Autocomplete command: suggestions for a partial term, grouped by section.

use std::error::Error;
use std::path::PathBuf;

use serde_json::Value;
use structopt::StructOpt;

use crate::autocomplete_api::{self, AutocompleteParameters};
use crate::client::BaseClient;
use crate::config::UserParameters;

use super::args::UserArgs;
use super::base::{
    block_on, collect_filters, evaluate_and_print_response, exit_on_error, parse_file,
    parse_key_value, Matcher,
};

#[derive(StructOpt, Debug)]
#[structopt(about = "Autocomplete a partial search term")]
pub struct AutocompleteCommand {
    #[structopt(help = "The partial search term")]
    pub term: String,

    #[structopt(long, help = "Total number of suggestions")]
    pub num_results: Option<u32>,

    #[structopt(
        long = "results-per-section",
        parse(try_from_str = parse_section_count),
        help = "Suggestions of one section as section=count, can be repeated"
    )]
    pub results_per_section: Vec<(String, u32)>,

    #[structopt(
        long = "filter",
        parse(try_from_str = parse_key_value),
        help = "Facet filter as facet=value, can be repeated"
    )]
    pub filters: Vec<(String, String)>,

    #[structopt(long, help = "Path to a JSON/YAML file with parameters")]
    pub params: Option<PathBuf>,

    #[structopt(flatten)]
    pub user: UserArgs,
}

fn parse_section_count(input: &str) -> Result<(String, u32), String> {
    let (section, count) = parse_key_value(input)?;
    let count = count
        .parse::<u32>()
        .map_err(|_| format!("Expected a number of results, got `{count}`"))?;
    Ok((section, count))
}

impl AutocompleteCommand {
    fn parameters(&mut self) -> Result<AutocompleteParameters, Box<dyn Error>> {
        let mut parameters = match &self.params {
            Some(path) => {
                let value: Value = parse_file(path)?;
                AutocompleteParameters::from_value(&value)?
            }
            None => AutocompleteParameters::default(),
        };

        if self.num_results.is_some() {
            parameters.num_results = self.num_results;
        }
        parameters
            .results_per_section
            .extend(self.results_per_section.drain(..));
        if !self.filters.is_empty() {
            parameters.filters = collect_filters(&self.filters);
        }

        parameters.validate()?;
        Ok(parameters)
    }
}

impl Matcher for AutocompleteCommand {
    fn process(mut self, client: &BaseClient) {
        let parameters = exit_on_error(self.parameters());
        let user = UserParameters::from(self.user);

        let response = block_on(autocomplete_api::get_autocomplete_results(
            client,
            &self.term,
            &parameters,
            &user,
        ));
        evaluate_and_print_response(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocomplete_arguments() {
        let mut command = AutocompleteCommand::from_iter_safe([
            "autocomplete",
            "dri",
            "--results-per-section",
            "Products=5",
            "--results-per-section",
            "Search Suggestions=3",
            "--filter",
            "brand=Makita",
        ])
        .unwrap();

        let parameters = command.parameters().unwrap();

        assert_eq!(parameters.results_per_section["Products"], 5);
        assert_eq!(parameters.results_per_section["Search Suggestions"], 3);
        assert_eq!(parameters.filters["brand"], vec!["Makita"]);
    }

    #[test]
    fn test_section_count_must_be_a_number() {
        assert!(parse_section_count("Products=five").is_err());
        assert_eq!(
            parse_section_count("Products=5").unwrap(),
            ("Products".to_string(), 5)
        );
    }
}
