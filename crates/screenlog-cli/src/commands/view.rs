use super::ensure_not_empty;
use super::prompts::Prompter;
use crate::output::Output;
use color_eyre::Result;
use media_catalog_core::{apply_filter, ranking, search, sort_by, statistics, CatalogStore, FilterField, MediaCatalog, SortKey};

pub fn run_list<S: CatalogStore>(catalog: &MediaCatalog<S>, sort: Option<SortKey>, output: &Output) -> Result<()> {
    if !ensure_not_empty(catalog, output) {
        return Ok(());
    }
    let view = sort.map(|key| sort_by(catalog.list(), key));
    output.media_list(&catalog.list_view(view));
    Ok(())
}

pub fn run_search<S: CatalogStore>(
    catalog: &MediaCatalog<S>,
    term: Option<String>,
    prompter: &mut dyn Prompter,
    output: &Output,
) -> Result<()> {
    if !ensure_not_empty(catalog, output) {
        return Ok(());
    }
    let term = match term {
        Some(term) => term,
        None => prompter.text("Enter part of the title:")?,
    };

    let results = search(catalog.list(), &term);
    if results.is_empty() {
        output.warn("No media found with that term.");
        return Ok(());
    }
    output.media_list(&catalog.list_view(Some(results)));
    Ok(())
}

pub fn run_filter<S: CatalogStore>(
    catalog: &MediaCatalog<S>,
    filter: Option<(FilterField, String)>,
    prompter: &mut dyn Prompter,
    output: &Output,
) -> Result<()> {
    if !ensure_not_empty(catalog, output) {
        return Ok(());
    }
    let (field, value) = match filter {
        Some(filter) => filter,
        None => {
            let choices = vec!["Genre".to_string(), "Platform".to_string()];
            let field = match prompter.select("Filter by:", &choices)? {
                0 => FilterField::Genre,
                _ => FilterField::Platform,
            };
            let noun = if field == FilterField::Genre { "genre" } else { "platform" };
            let value = prompter.text(&format!("Enter the {} to search for:", noun))?;
            (field, value)
        }
    };

    let filtered = apply_filter(catalog.list(), field, &value);
    if filtered.is_empty() {
        output.warn(format!("No media found for \"{}\".", value));
        return Ok(());
    }
    output.media_list(&catalog.list_view(Some(filtered)));
    Ok(())
}

pub fn run_sort<S: CatalogStore>(
    catalog: &MediaCatalog<S>,
    key: Option<SortKey>,
    prompter: &mut dyn Prompter,
    output: &Output,
) -> Result<()> {
    if !ensure_not_empty(catalog, output) {
        return Ok(());
    }
    let key = match key {
        Some(key) => key,
        None => {
            let choices = vec![
                "Title (A-Z)".to_string(),
                "Year (newest first)".to_string(),
                "Rating (highest first)".to_string(),
            ];
            match prompter.select("Sort by:", &choices)? {
                0 => SortKey::Title,
                1 => SortKey::Year,
                _ => SortKey::Rating,
            }
        }
    };
    run_list(catalog, Some(key), output)
}

pub fn run_stats<S: CatalogStore>(catalog: &MediaCatalog<S>, output: &Output) -> Result<()> {
    if !ensure_not_empty(catalog, output) {
        return Ok(());
    }
    output.stats(&statistics(catalog.list()));
    Ok(())
}

pub fn run_ranking<S: CatalogStore>(catalog: &MediaCatalog<S>, output: &Output) -> Result<()> {
    let ranked = ranking(catalog.list());
    if ranked.is_empty() {
        output.warn("No media rated yet.");
        return Ok(());
    }
    output.ranking(&ranked);
    Ok(())
}
