use structopt::StructOpt;

use crate::cli::args::{ResultArgs, UserArgs};
use crate::cli::base::{block_on, evaluate_and_print_response, exit_on_error, Matcher};
use crate::client::BaseClient;
use crate::config::UserParameters;
use crate::search_api;

/// A search request as given on the command line.
///
/// The term is required; everything else narrows, pages or sorts the
/// results and may also be loaded from a parameter file with `--params`.
#[derive(Debug, StructOpt)]
#[structopt(about = "Search the index")]
pub struct SearchQuery {
    /// The search term
    #[structopt(help = "The search term")]
    pub query: String,

    #[structopt(flatten)]
    pub results: ResultArgs,

    #[structopt(flatten)]
    pub user: UserArgs,
}

impl Matcher for SearchQuery {
    fn process(self, client: &BaseClient) {
        let parameters = exit_on_error(self.results.into_parameters());
        let user = UserParameters::from(self.user);

        let response = block_on(search_api::get_search_results(
            client,
            &self.query,
            &parameters,
            &user,
        ));
        evaluate_and_print_response(response);
    }
}
