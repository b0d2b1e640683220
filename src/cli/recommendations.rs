//! Recommendations command: query a recommendations pod.

use std::error::Error;
use std::path::PathBuf;

use serde_json::Value;
use structopt::StructOpt;

use crate::client::BaseClient;
use crate::config::UserParameters;
use crate::recommendations_api::{self, RecommendationsParameters};

use super::args::UserArgs;
use super::base::{
    block_on, collect_filters, evaluate_and_print_response, exit_on_error, parse_file,
    parse_key_value, Matcher,
};

#[derive(StructOpt, Debug)]
#[structopt(about = "Retrieve the recommendations of a pod")]
pub struct RecommendationsCommand {
    #[structopt(help = "Identifier of the recommendations pod")]
    pub pod_id: String,

    #[structopt(long, help = "Number of recommendations")]
    pub num_results: Option<u32>,

    #[structopt(long = "item-id", help = "Seed item, can be repeated")]
    pub item_ids: Vec<String>,

    #[structopt(long, help = "Search term, for query based pods")]
    pub term: Option<String>,

    #[structopt(long, help = "Index section to recommend from")]
    pub section: Option<String>,

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

impl RecommendationsCommand {
    fn parameters(&mut self) -> Result<RecommendationsParameters, Box<dyn Error>> {
        let mut parameters = match &self.params {
            Some(path) => {
                let value: Value = parse_file(path)?;
                RecommendationsParameters::from_value(&value)?
            }
            None => RecommendationsParameters::default(),
        };

        if self.num_results.is_some() {
            parameters.num_results = self.num_results;
        }
        if !self.item_ids.is_empty() {
            parameters.item_ids = std::mem::take(&mut self.item_ids);
        }
        if self.term.is_some() {
            parameters.term = self.term.take();
        }
        if self.section.is_some() {
            parameters.section = self.section.take();
        }
        if !self.filters.is_empty() {
            parameters.filters = collect_filters(&self.filters);
        }

        parameters.validate()?;
        Ok(parameters)
    }
}

impl Matcher for RecommendationsCommand {
    fn process(mut self, client: &BaseClient) {
        let parameters = exit_on_error(self.parameters());
        let user = UserParameters::from(self.user);

        let response = block_on(recommendations_api::get_recommendations(
            client,
            &self.pod_id,
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
    fn test_recommendations_arguments() {
        let mut command = RecommendationsCommand::from_iter_safe([
            "recommendations",
            "item_page_1",
            "--item-id",
            "10001",
            "--item-id",
            "10002",
            "--num-results",
            "4",
        ])
        .unwrap();

        let parameters = command.parameters().unwrap();

        assert_eq!(command.pod_id, "item_page_1");
        assert_eq!(parameters.item_ids, vec!["10001", "10002"]);
        assert_eq!(parameters.num_results, Some(4));
    }

    #[test]
    fn test_zero_results_are_rejected() {
        let mut command =
            RecommendationsCommand::from_iter_safe(["recommendations", "pod", "--num-results", "0"])
                .unwrap();

        assert!(command.parameters().is_err());
    }
}
