//! Catalog management commands
//!
//! All commands in this module need an API token, either from the selected
//! profile or from `CIO_API_TOKEN`. Request bodies of the item and redirect
//! rule commands are read from JSON/YAML files.

use std::path::PathBuf;

use structopt::StructOpt;

use crate::catalog_api::models::{
    CatalogFileParameters, CatalogFiles, Item, ItemBatch, ItemGroupUpdate, ItemGroups,
    ItemListParameters, OneWaySynonym, RedirectRule, RedirectRuleListParameters,
    RedirectRuleStatus, SynonymGroup, SynonymListParameters,
};
use crate::catalog_api::{
    files, item_groups, items, one_way_synonyms, redirect_rules, synonym_groups,
};
use crate::client::BaseClient;
use crate::error::ClientResult;
use crate::file::UploadFile;

use super::base::{block_on, evaluate_and_print_response, exit_on_error, parse_file, Matcher};

/// Subcommands for managing the catalog of an index
#[derive(StructOpt, Debug)]
#[structopt(about = "Manage the catalog of the index")]
pub enum CatalogSubCommand {
    /// Items and item batches
    Item(ItemSubCommand),

    /// Item groups (categories)
    ItemGroup(ItemGroupSubCommand),

    /// Groups of equivalent phrases
    SynonymGroup(SynonymGroupSubCommand),

    /// Phrases that expand into other phrases
    OneWaySynonym(OneWaySynonymSubCommand),

    /// Rules sending queries to a fixed URL
    RedirectRule(RedirectRuleSubCommand),

    /// Replace the catalog of a section with CSV files
    #[structopt(about = "Replace the catalog with CSV files")]
    Replace(CatalogUpload),

    /// Add and update items from CSV files
    #[structopt(about = "Add and update catalog items from CSV files")]
    Update(CatalogUpload),
}

impl Matcher for CatalogSubCommand {
    fn process(self, client: &BaseClient) {
        match self {
            CatalogSubCommand::Item(command) => command.process(client),
            CatalogSubCommand::ItemGroup(command) => command.process(client),
            CatalogSubCommand::SynonymGroup(command) => command.process(client),
            CatalogSubCommand::OneWaySynonym(command) => command.process(client),
            CatalogSubCommand::RedirectRule(command) => command.process(client),
            CatalogSubCommand::Replace(upload) => {
                let (files, parameters) = upload.load();
                let response = block_on(files::replace_catalog(client, &files, &parameters));
                evaluate_and_print_response(response);
            }
            CatalogSubCommand::Update(upload) => {
                let (files, parameters) = upload.load();
                let response = block_on(files::update_catalog(client, &files, &parameters));
                evaluate_and_print_response(response);
            }
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(about = "Manage the items of the index")]
pub enum ItemSubCommand {
    #[structopt(about = "Add an item")]
    Add {
        #[structopt(help = "Path to the JSON/YAML file containing the item")]
        body: PathBuf,
    },

    #[structopt(about = "Add an item or replace it if it exists")]
    AddOrUpdate {
        #[structopt(help = "Path to the JSON/YAML file containing the item")]
        body: PathBuf,
    },

    #[structopt(about = "Modify an item")]
    Modify {
        #[structopt(help = "Path to the JSON/YAML file containing the item")]
        body: PathBuf,
    },

    #[structopt(about = "Remove an item")]
    Remove {
        #[structopt(help = "Path to the JSON/YAML file containing the item")]
        body: PathBuf,
    },

    #[structopt(about = "Add a batch of items")]
    AddBatch {
        #[structopt(help = "Path to the JSON/YAML file containing the batch")]
        body: PathBuf,
    },

    #[structopt(about = "Add a batch of items, replacing existing ones")]
    AddOrUpdateBatch {
        #[structopt(help = "Path to the JSON/YAML file containing the batch")]
        body: PathBuf,
    },

    #[structopt(about = "Remove a batch of items")]
    RemoveBatch {
        #[structopt(help = "Path to the JSON/YAML file containing the batch")]
        body: PathBuf,
    },

    #[structopt(about = "List items, or retrieve one by id")]
    Get {
        #[structopt(help = "Id of a single item to retrieve")]
        id: Option<String>,

        #[structopt(long, help = "Index section of the items")]
        section: Option<String>,

        #[structopt(long, help = "Page of items to return")]
        page: Option<u32>,

        #[structopt(long, help = "Number of items per page")]
        num_results_per_page: Option<u32>,
    },
}

impl Matcher for ItemSubCommand {
    fn process(self, client: &BaseClient) {
        match self {
            ItemSubCommand::Add { body } => {
                let item: Item = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(items::add_item(client, &item)));
            }
            ItemSubCommand::AddOrUpdate { body } => {
                let item: Item = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(items::add_or_update_item(client, &item)));
            }
            ItemSubCommand::Modify { body } => {
                let item: Item = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(items::modify_item(client, &item)));
            }
            ItemSubCommand::Remove { body } => {
                let item: Item = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(items::remove_item(client, &item)));
            }
            ItemSubCommand::AddBatch { body } => {
                let batch: ItemBatch = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(items::add_item_batch(client, &batch)));
            }
            ItemSubCommand::AddOrUpdateBatch { body } => {
                let batch: ItemBatch = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(items::add_or_update_item_batch(
                    client, &batch,
                )));
            }
            ItemSubCommand::RemoveBatch { body } => {
                let batch: ItemBatch = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(items::remove_item_batch(client, &batch)));
            }
            ItemSubCommand::Get {
                id,
                section,
                page,
                num_results_per_page,
            } => {
                let parameters = ItemListParameters {
                    section,
                    page,
                    num_results_per_page,
                };
                match id {
                    Some(id) => evaluate_and_print_response(block_on(items::get_item(
                        client,
                        &id,
                        &parameters,
                    ))),
                    None => {
                        evaluate_and_print_response(block_on(items::get_items(client, &parameters)))
                    }
                }
            }
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(about = "Manage the item groups of the index")]
pub enum ItemGroupSubCommand {
    #[structopt(about = "Add item groups")]
    Add {
        #[structopt(help = "Path to the JSON/YAML file containing the item groups")]
        body: PathBuf,
    },

    #[structopt(about = "Add item groups, replacing existing ones")]
    AddOrUpdate {
        #[structopt(help = "Path to the JSON/YAML file containing the item groups")]
        body: PathBuf,
    },

    #[structopt(about = "Retrieve an item group")]
    Get {
        #[structopt(help = "Id of the item group")]
        id: String,
    },

    #[structopt(about = "Modify an item group")]
    Modify {
        #[structopt(help = "Id of the item group")]
        id: String,

        #[structopt(long, help = "New display name")]
        name: Option<String>,

        #[structopt(long, help = "New parent group")]
        parent_id: Option<String>,
    },

    #[structopt(about = "Remove all item groups")]
    RemoveAll,
}

impl Matcher for ItemGroupSubCommand {
    fn process(self, client: &BaseClient) {
        match self {
            ItemGroupSubCommand::Add { body } => {
                let groups: ItemGroups = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(item_groups::add_item_groups(
                    client, &groups,
                )));
            }
            ItemGroupSubCommand::AddOrUpdate { body } => {
                let groups: ItemGroups = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(item_groups::add_or_update_item_groups(
                    client, &groups,
                )));
            }
            ItemGroupSubCommand::Get { id } => {
                evaluate_and_print_response(block_on(item_groups::get_item_group(client, &id)));
            }
            ItemGroupSubCommand::Modify {
                id,
                name,
                parent_id,
            } => {
                let update = ItemGroupUpdate {
                    name,
                    parent_id,
                    data: None,
                };
                evaluate_and_print_response(block_on(item_groups::modify_item_group(
                    client, &id, &update,
                )));
            }
            ItemGroupSubCommand::RemoveAll => {
                evaluate_and_print_response(block_on(item_groups::remove_item_groups(client)));
            }
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(about = "Manage the synonym groups of the index")]
pub enum SynonymGroupSubCommand {
    #[structopt(about = "Add a synonym group")]
    Add {
        #[structopt(required = true, help = "Phrases of the group")]
        synonyms: Vec<String>,
    },

    #[structopt(about = "Replace the phrases of a synonym group")]
    Modify {
        #[structopt(help = "Id of the synonym group")]
        id: u64,

        #[structopt(required = true, help = "Phrases of the group")]
        synonyms: Vec<String>,
    },

    #[structopt(about = "List synonym groups, or retrieve one by id")]
    Get {
        #[structopt(help = "Id of a single synonym group")]
        id: Option<u64>,

        #[structopt(flatten)]
        listing: ListingArgs,
    },

    #[structopt(about = "Remove a synonym group")]
    Remove {
        #[structopt(help = "Id of the synonym group")]
        id: u64,
    },

    #[structopt(about = "Remove all synonym groups")]
    RemoveAll,
}

impl Matcher for SynonymGroupSubCommand {
    fn process(self, client: &BaseClient) {
        match self {
            SynonymGroupSubCommand::Add { synonyms } => {
                let group = SynonymGroup::new(synonyms);
                evaluate_and_print_response(block_on(synonym_groups::add_synonym_group(
                    client, &group,
                )));
            }
            SynonymGroupSubCommand::Modify { id, synonyms } => {
                let group = SynonymGroup::new(synonyms);
                evaluate_and_print_response(block_on(synonym_groups::modify_synonym_group(
                    client, id, &group,
                )));
            }
            SynonymGroupSubCommand::Get { id: Some(id), .. } => {
                evaluate_and_print_response(block_on(synonym_groups::get_synonym_group(
                    client, id,
                )));
            }
            SynonymGroupSubCommand::Get { id: None, listing } => {
                evaluate_and_print_response(block_on(synonym_groups::get_synonym_groups(
                    client,
                    &listing.into(),
                )));
            }
            SynonymGroupSubCommand::Remove { id } => {
                evaluate_and_print_response(block_on(synonym_groups::remove_synonym_group(
                    client, id,
                )));
            }
            SynonymGroupSubCommand::RemoveAll => {
                evaluate_and_print_response(block_on(synonym_groups::remove_synonym_groups(
                    client,
                )));
            }
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(about = "Manage the one-way synonyms of the index")]
pub enum OneWaySynonymSubCommand {
    #[structopt(about = "Add a one-way synonym")]
    Add {
        #[structopt(help = "Phrase that is expanded")]
        phrase: String,

        #[structopt(required = true, help = "Phrases it expands into")]
        children: Vec<String>,
    },

    #[structopt(about = "Replace the child phrases of a one-way synonym")]
    Modify {
        #[structopt(help = "Phrase that is expanded")]
        phrase: String,

        #[structopt(required = true, help = "Phrases it expands into")]
        children: Vec<String>,
    },

    #[structopt(about = "List one-way synonyms, or retrieve one by phrase")]
    Get {
        #[structopt(help = "Parent phrase of a single one-way synonym")]
        phrase: Option<String>,

        #[structopt(flatten)]
        listing: ListingArgs,
    },

    #[structopt(about = "Remove a one-way synonym")]
    Remove {
        #[structopt(help = "Phrase that is expanded")]
        phrase: String,
    },

    #[structopt(about = "Remove all one-way synonyms")]
    RemoveAll,
}

impl Matcher for OneWaySynonymSubCommand {
    fn process(self, client: &BaseClient) {
        match self {
            OneWaySynonymSubCommand::Add { phrase, children } => {
                let synonym = OneWaySynonym::new(children);
                evaluate_and_print_response(block_on(one_way_synonyms::add_one_way_synonym(
                    client, &phrase, &synonym,
                )));
            }
            OneWaySynonymSubCommand::Modify { phrase, children } => {
                let synonym = OneWaySynonym::new(children);
                evaluate_and_print_response(block_on(
                    one_way_synonyms::modify_one_way_synonym(client, &phrase, &synonym),
                ));
            }
            OneWaySynonymSubCommand::Get {
                phrase: Some(phrase),
                ..
            } => {
                evaluate_and_print_response(block_on(one_way_synonyms::get_one_way_synonym(
                    client, &phrase,
                )));
            }
            OneWaySynonymSubCommand::Get {
                phrase: None,
                listing,
            } => {
                evaluate_and_print_response(block_on(one_way_synonyms::get_one_way_synonyms(
                    client,
                    &listing.into(),
                )));
            }
            OneWaySynonymSubCommand::Remove { phrase } => {
                evaluate_and_print_response(block_on(
                    one_way_synonyms::remove_one_way_synonym(client, &phrase),
                ));
            }
            OneWaySynonymSubCommand::RemoveAll => {
                evaluate_and_print_response(block_on(
                    one_way_synonyms::remove_one_way_synonyms(client),
                ));
            }
        }
    }
}

/// Paging of the synonym listings
#[derive(StructOpt, Debug, Default)]
pub struct ListingArgs {
    #[structopt(long, help = "Only entries containing this phrase")]
    pub filter_phrase: Option<String>,

    #[structopt(long, help = "Page of entries to return")]
    pub page: Option<u32>,

    #[structopt(long, help = "Number of entries per page")]
    pub num_results_per_page: Option<u32>,
}

impl From<ListingArgs> for SynonymListParameters {
    fn from(args: ListingArgs) -> Self {
        SynonymListParameters {
            num_results_per_page: args.num_results_per_page,
            page: args.page,
            phrase: args.filter_phrase,
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(about = "Manage the redirect rules of the index")]
pub enum RedirectRuleSubCommand {
    #[structopt(about = "Add a redirect rule")]
    Add {
        #[structopt(help = "Path to the JSON/YAML file containing the rule")]
        body: PathBuf,
    },

    #[structopt(about = "Replace a redirect rule")]
    Modify {
        #[structopt(help = "Id of the redirect rule")]
        id: String,

        #[structopt(help = "Path to the JSON/YAML file containing the rule")]
        body: PathBuf,
    },

    #[structopt(about = "Change some fields of a redirect rule")]
    Update {
        #[structopt(help = "Id of the redirect rule")]
        id: String,

        #[structopt(help = "Path to the JSON/YAML file containing the changed fields")]
        body: PathBuf,
    },

    #[structopt(about = "List redirect rules, or retrieve one by id")]
    Get {
        #[structopt(help = "Id of a single redirect rule")]
        id: Option<String>,

        #[structopt(long, help = "Only rules matching this query")]
        query: Option<String>,

        #[structopt(long, help = "Only rules in this state (current, pending, expired)")]
        status: Option<RedirectRuleStatus>,

        #[structopt(long, help = "Page of rules to return")]
        page: Option<u32>,

        #[structopt(long, help = "Number of rules per page")]
        num_results_per_page: Option<u32>,
    },

    #[structopt(about = "Remove a redirect rule")]
    Remove {
        #[structopt(help = "Id of the redirect rule")]
        id: String,
    },
}

impl Matcher for RedirectRuleSubCommand {
    fn process(self, client: &BaseClient) {
        match self {
            RedirectRuleSubCommand::Add { body } => {
                let rule: RedirectRule = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(redirect_rules::add_redirect_rule(
                    client, &rule,
                )));
            }
            RedirectRuleSubCommand::Modify { id, body } => {
                let rule: RedirectRule = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(redirect_rules::modify_redirect_rule(
                    client, &id, &rule,
                )));
            }
            RedirectRuleSubCommand::Update { id, body } => {
                let rule: RedirectRule = exit_on_error(parse_file(body));
                evaluate_and_print_response(block_on(redirect_rules::update_redirect_rule(
                    client, &id, &rule,
                )));
            }
            RedirectRuleSubCommand::Get { id: Some(id), .. } => {
                evaluate_and_print_response(block_on(redirect_rules::get_redirect_rule(
                    client, &id,
                )));
            }
            RedirectRuleSubCommand::Get {
                id: None,
                query,
                status,
                page,
                num_results_per_page,
            } => {
                let parameters = RedirectRuleListParameters {
                    num_results_per_page,
                    page,
                    query,
                    status,
                };
                evaluate_and_print_response(block_on(redirect_rules::get_redirect_rules(
                    client,
                    &parameters,
                )));
            }
            RedirectRuleSubCommand::Remove { id } => {
                evaluate_and_print_response(block_on(redirect_rules::remove_redirect_rule(
                    client, &id,
                )));
            }
        }
    }
}

/// CSV files and options of a catalog upload
#[derive(StructOpt, Debug)]
pub struct CatalogUpload {
    #[structopt(long, help = "CSV file of items")]
    pub items: Option<PathBuf>,

    #[structopt(long, help = "CSV file of variations")]
    pub variations: Option<PathBuf>,

    #[structopt(long, help = "CSV file of item groups")]
    pub item_groups: Option<PathBuf>,

    #[structopt(long, default_value = "Products", help = "Index section to upload to")]
    pub section: String,

    #[structopt(long, help = "Address notified once the upload is processed")]
    pub notification_email: Option<String>,

    #[structopt(long, help = "Process the upload even if it removes many items")]
    pub force: bool,
}

impl CatalogUpload {
    fn load(self) -> (CatalogFiles, CatalogFileParameters) {
        let files = exit_on_error(block_on(self.read_files()));
        let parameters = CatalogFileParameters {
            section: self.section,
            notification_email: self.notification_email,
            force: self.force,
        };
        (files, parameters)
    }

    async fn read_files(&self) -> ClientResult<CatalogFiles> {
        Ok(CatalogFiles {
            items: read_optional(&self.items).await?,
            variations: read_optional(&self.variations).await?,
            item_groups: read_optional(&self.item_groups).await?,
        })
    }
}

async fn read_optional(path: &Option<PathBuf>) -> ClientResult<Option<UploadFile>> {
    match path {
        Some(path) => Ok(Some(UploadFile::from_path(path).await?)),
        None => Ok(None),
    }
}
