pub mod add;
pub mod delete;
pub mod menu;
pub mod prompts;
pub mod update;
pub mod view;

use crate::output::Output;
use color_eyre::Result;
use media_catalog_core::{CatalogStore, MediaCatalog};
use prompts::Prompter;

pub const EMPTY_CATALOG: &str = "No media registered.";

/// Warn and return false when there is nothing to act on.
pub fn ensure_not_empty<S: CatalogStore>(catalog: &MediaCatalog<S>, output: &Output) -> bool {
    if catalog.is_empty() {
        output.warn(EMPTY_CATALOG);
        return false;
    }
    true
}

/// Let the user pick an entry by title; returns its id.
pub fn choose_media<S: CatalogStore>(
    catalog: &MediaCatalog<S>,
    prompter: &mut dyn Prompter,
    prompt: &str,
) -> Result<u64> {
    let titles: Vec<String> = catalog
        .list()
        .iter()
        .map(|item| format!("{} ({})", item.title, item.release_year))
        .collect();
    let index = prompter.select(prompt, &titles)?;
    Ok(catalog.list()[index].id)
}
