//! Browse command: list the results of one facet value or group.

use structopt::StructOpt;

use crate::browse_api;
use crate::client::BaseClient;
use crate::config::UserParameters;

use super::args::{ResultArgs, UserArgs};
use super::base::{block_on, evaluate_and_print_response, exit_on_error, Matcher};

#[derive(StructOpt, Debug)]
#[structopt(about = "Browse the results of a facet value or item group")]
pub struct BrowseCommand {
    #[structopt(help = "Filter to browse by, e.g. group_id or a facet name")]
    pub filter_name: String,

    #[structopt(help = "Value of the filter")]
    pub filter_value: String,

    #[structopt(flatten)]
    pub results: ResultArgs,

    #[structopt(flatten)]
    pub user: UserArgs,
}

impl Matcher for BrowseCommand {
    fn process(self, client: &BaseClient) {
        let parameters = exit_on_error(self.results.into_parameters());
        let user = UserParameters::from(self.user);

        let response = block_on(browse_api::get_browse_results(
            client,
            &self.filter_name,
            &self.filter_value,
            &parameters,
            &user,
        ));
        evaluate_and_print_response(response);
    }
}
