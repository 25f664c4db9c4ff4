use super::prompts::{prompt_count, Prompter};
use crate::output::Output;
use clap::Args;
use color_eyre::Result;
use media_catalog_core::{CatalogStore, MediaCatalog, MediaDraft};
use media_catalog_models::MediaType;
use serde_json::json;

/// Values not given on the command line are prompted for.
#[derive(Debug, Default, Clone, Args)]
pub struct AddArgs {
    /// Title
    #[arg(long)]
    pub title: Option<String>,

    /// movie or series
    #[arg(long = "type", value_name = "TYPE")]
    pub media_type: Option<MediaType>,

    /// Comma-separated genres, e.g. "action, drama"
    #[arg(long)]
    pub genres: Option<String>,

    /// Release year
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i32>,

    /// Streaming platform (Netflix, Prime...)
    #[arg(long)]
    pub platform: Option<String>,

    /// Number of seasons (series only)
    #[arg(long)]
    pub seasons: Option<u32>,

    /// Total number of episodes (series only)
    #[arg(long)]
    pub episodes: Option<u32>,

    /// Runtime in minutes for a movie, average episode length for a series
    #[arg(long)]
    pub duration: Option<u32>,
}

pub fn run_add<S: CatalogStore>(
    catalog: &mut MediaCatalog<S>,
    args: AddArgs,
    prompter: &mut dyn Prompter,
    output: &Output,
) -> Result<()> {
    let title = match args.title {
        Some(title) => title,
        None => prompter.text("Title:")?,
    };

    let media_type = match args.media_type {
        Some(media_type) => media_type,
        None => {
            let choices = vec!["Movie".to_string(), "Series".to_string()];
            match prompter.select("Type:", &choices)? {
                0 => MediaType::Movie,
                _ => MediaType::Series,
            }
        }
    };

    let genres = match args.genres {
        Some(genres) => genres,
        None => prompter.text("Genres (comma separated, e.g. action, drama, adventure):")?,
    };

    let release_year = match args.year {
        Some(year) => year,
        None => prompt_year(prompter)?,
    };

    let platform = match args.platform {
        Some(platform) => platform,
        None => prompter.text("Platform (Netflix, Prime...):")?,
    };

    let mut draft = MediaDraft {
        title,
        media_type,
        genres,
        release_year,
        platform,
        season_count: None,
        total_episodes: None,
        duration_minutes: None,
    };

    match media_type {
        MediaType::Series => {
            draft.season_count = Some(or_prompt(args.seasons, prompter, "Number of seasons:")?);
            draft.total_episodes = Some(or_prompt(args.episodes, prompter, "Total number of episodes:")?);
            draft.duration_minutes = Some(or_prompt(args.duration, prompter, "Average episode duration (min):")?);
        }
        MediaType::Movie => {
            draft.duration_minutes = Some(or_prompt(args.duration, prompter, "Movie duration (min):")?);
        }
    }

    let item = catalog.register(draft)?;

    if output.is_human() {
        output.success(format!("\"{}\" was added successfully!", item.title));
    } else {
        output.json(&json!({ "type": "added", "item": item }));
    }
    Ok(())
}

fn or_prompt(value: Option<u32>, prompter: &mut dyn Prompter, prompt: &str) -> Result<u32> {
    match value {
        Some(value) => Ok(value),
        None => prompt_count(prompter, prompt),
    }
}

fn prompt_year(prompter: &mut dyn Prompter) -> Result<i32> {
    loop {
        let value = prompter.number("Release year:")?;
        match i32::try_from(value) {
            Ok(year) => return Ok(year),
            Err(_) => eprintln!("Please enter a valid year."),
        }
    }
}
