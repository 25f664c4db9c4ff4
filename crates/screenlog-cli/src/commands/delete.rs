use super::prompts::Prompter;
use super::{choose_media, ensure_not_empty};
use crate::output::Output;
use color_eyre::Result;
use media_catalog_core::{CatalogError, CatalogStore, MediaCatalog};
use serde_json::json;

pub fn run_delete<S: CatalogStore>(
    catalog: &mut MediaCatalog<S>,
    id: Option<u64>,
    yes: bool,
    prompter: &mut dyn Prompter,
    output: &Output,
) -> Result<()> {
    if !ensure_not_empty(catalog, output) {
        return Ok(());
    }

    let id = match id {
        Some(id) => id,
        None => choose_media(catalog, prompter, "Select the media to delete:")?,
    };
    if catalog.get(id).is_none() {
        return Err(CatalogError::NotFound { id }.into());
    }

    let confirmed = yes || prompter.confirm("Are you sure you want to delete it?", false)?;

    match catalog.delete(id, confirmed)? {
        Some(removed) if output.is_human() => output.success(format!("\"{}\" removed successfully!", removed.title)),
        Some(removed) => output.json(&json!({ "type": "deleted", "item": removed })),
        None => output.info("Action cancelled."),
    }
    Ok(())
}
