use std::error::Error;

use colored::Colorize;
use structopt::StructOpt;

use constructorio::cli::auth::{AuthProfile, AuthSubCommand};
use constructorio::cli::autocomplete::AutocompleteCommand;
use constructorio::cli::base::{init_logging, print_error, Matcher};
use constructorio::cli::browse::BrowseCommand;
use constructorio::cli::catalog::CatalogSubCommand;
use constructorio::cli::recommendations::RecommendationsCommand;
use constructorio::client::BaseClient;
use constructorio::config::ClientOptions;
use constructorio::search_api::query::SearchQuery;

static HEADER: &str = r#"
--- Constructor.io Command Line Interface (ciocli) ---
"#;

#[derive(StructOpt, Debug)]
struct GlobalOpts {
    /// Profile name to use for configuration
    #[structopt(short, long)]
    profile: Option<String>,
}

#[derive(StructOpt, Debug)]
#[structopt(about = "CLI to query and manage a Constructor.io index")]
struct Cli {
    #[structopt(flatten)]
    global: GlobalOpts,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    Search(SearchQuery),
    Browse(BrowseCommand),
    Autocomplete(AutocompleteCommand),
    Recommendations(RecommendationsCommand),
    Catalog(CatalogSubCommand),
    Auth(AuthSubCommand),
}

fn main() {
    let cli = Cli::from_args();
    if let Err(err) = init_logging() {
        print_error(format!("Failed to set up logging: {err}"));
    }

    // Setting a profile does not need a client
    let cmd = match cli.cmd {
        Command::Auth(cmd) => {
            cmd.process();
            return;
        }
        cmd => cmd,
    };

    let client = match setup_client(cli.global.profile.as_deref()) {
        Ok(client) => client,
        Err(err) => {
            print_error(format!("Failed to set up client: {err}"));
            std::process::exit(exitcode::CONFIG);
        }
    };

    if atty::is(atty::Stream::Stdout) {
        println!("{}", HEADER.bold());
    }

    match cmd {
        Command::Search(command) => command.process(&client),
        Command::Browse(command) => command.process(&client),
        Command::Autocomplete(command) => command.process(&client),
        Command::Recommendations(command) => command.process(&client),
        Command::Catalog(command) => command.process(&client),
        Command::Auth(command) => command.process(),
    }
}

/// Options come from the keyring profile if one is named, else from `CIO_*`
fn setup_client(profile: Option<&str>) -> Result<BaseClient, Box<dyn Error>> {
    let options = match profile {
        Some(name) => AuthProfile::get_from_keyring(name)?.to_options(),
        None => ClientOptions::from_env()?,
    };
    Ok(BaseClient::new(options)?)
}
