use super::prompts::{prompt_count, Prompter};
use super::{choose_media, ensure_not_empty};
use crate::output::Output;
use color_eyre::Result;
use media_catalog_core::{CatalogError, CatalogStore, MediaCatalog, MediaUpdate};
use media_catalog_models::{MediaKind, Rating};
use serde_json::json;

const RATING_PROMPT: &str = "What did you think of it? Rate it (1 to 10, or 0 to skip):";

/// Update watched episodes and rating. With no id the entry is picked from a list;
/// with neither `watched` nor `rating` given, both are prompted for.
pub fn run_update<S: CatalogStore>(
    catalog: &mut MediaCatalog<S>,
    id: Option<u64>,
    watched: Option<u32>,
    rating: Option<i64>,
    prompter: &mut dyn Prompter,
    output: &Output,
) -> Result<()> {
    if !ensure_not_empty(catalog, output) {
        return Ok(());
    }

    let id = match id {
        Some(id) => id,
        None => choose_media(catalog, prompter, "Select the media to update:")?,
    };
    let item = catalog.get(id).ok_or(CatalogError::NotFound { id })?;

    let ask = watched.is_none() && rating.is_none();
    let mut changes = MediaUpdate {
        watched_episodes: watched,
        rating: rating.and_then(Rating::from_input),
    };

    if ask {
        if let MediaKind::Series { total_episodes, .. } = item.kind {
            let prompt = format!("Episodes watched (of {}):", total_episodes);
            changes.watched_episodes = Some(prompt_count(prompter, &prompt)?);
        }
        changes.rating = rating_from_text(&prompter.text(RATING_PROMPT)?);
    }

    let updated = catalog.update(id, changes)?;

    if output.is_human() {
        output.success("Media updated successfully!");
    } else {
        output.json(&json!({ "type": "updated", "item": updated }));
    }
    Ok(())
}

/// Blank or non-numeric input skips the rating, like an explicit 0.
fn rating_from_text(input: &str) -> Option<Rating> {
    input.trim().parse::<i64>().ok().and_then(Rating::from_input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::prompts::scripted::{Answer, ScriptedPrompter};
    use crate::commands::test_support::{catalog_with, movie, quiet_output, series};

    #[test]
    fn test_update_series_interactively() {
        let mut catalog = catalog_with(vec![movie("Heat", 1995, "Max", "crime"), series("The OA", 16, 60)]);
        let mut prompter = ScriptedPrompter::new([
            Answer::Choice(1),
            Answer::Number(8),
            Answer::Text("7".to_string()),
        ]);

        run_update(&mut catalog, None, None, None, &mut prompter, &quiet_output()).unwrap();

        let show = &catalog.list()[1];
        assert_eq!(show.watched_episodes(), 8);
        assert_eq!(show.rating, Rating::new(7));
        assert_eq!(prompter.prompts[1], "Episodes watched (of 16):");
    }

    #[test]
    fn test_update_movie_only_asks_rating() {
        let mut catalog = catalog_with(vec![movie("Heat", 1995, "Max", "crime")]);
        let id = catalog.list()[0].id;
        let mut prompter = ScriptedPrompter::new([Answer::Text("10".to_string())]);

        run_update(&mut catalog, Some(id), None, None, &mut prompter, &quiet_output()).unwrap();

        assert_eq!(prompter.prompts, vec![RATING_PROMPT]);
        assert_eq!(catalog.list()[0].rating, Rating::new(10));
    }

    #[test]
    fn test_update_zero_rating_skips() {
        let mut catalog = catalog_with(vec![movie("Heat", 1995, "Max", "crime")]);
        let id = catalog.list()[0].id;
        let mut prompter = ScriptedPrompter::default();

        run_update(&mut catalog, Some(id), None, Some(6), &mut prompter, &quiet_output()).unwrap();
        run_update(&mut catalog, Some(id), None, Some(0), &mut prompter, &quiet_output()).unwrap();
        run_update(&mut catalog, Some(id), None, Some(14), &mut prompter, &quiet_output()).unwrap();

        assert_eq!(catalog.list()[0].rating, Rating::new(6));
    }

    #[test]
    fn test_update_blank_rating_answer_skips() {
        let mut catalog = catalog_with(vec![movie("Heat", 1995, "Max", "crime")]);
        let id = catalog.list()[0].id;
        run_update(&mut catalog, Some(id), None, Some(6), &mut ScriptedPrompter::default(), &quiet_output()).unwrap();

        let mut prompter = ScriptedPrompter::new([Answer::Text(String::new()), Answer::Text("great".to_string())]);
        run_update(&mut catalog, Some(id), None, None, &mut prompter, &quiet_output()).unwrap();
        run_update(&mut catalog, Some(id), None, None, &mut prompter, &quiet_output()).unwrap();

        assert_eq!(prompter.prompts, vec![RATING_PROMPT, RATING_PROMPT]);
        assert_eq!(catalog.list()[0].rating, Rating::new(6));
    }

    #[test]
    fn test_rating_from_text() {
        assert_eq!(rating_from_text(" 9 "), Rating::new(9));
        assert_eq!(rating_from_text(""), None);
        assert_eq!(rating_from_text("0"), None);
        assert_eq!(rating_from_text("11"), None);
        assert_eq!(rating_from_text("nine"), None);
    }

    #[test]
    fn test_update_flags_do_not_prompt() {
        let mut catalog = catalog_with(vec![series("Fleabag", 12, 27)]);
        let id = catalog.list()[0].id;
        let mut prompter = ScriptedPrompter::default();

        run_update(&mut catalog, Some(id), Some(12), None, &mut prompter, &quiet_output()).unwrap();

        assert_eq!(catalog.list()[0].watched_episodes(), 12);
        assert_eq!(catalog.list()[0].rating, None);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut catalog = catalog_with(vec![movie("Heat", 1995, "Max", "crime")]);
        let mut prompter = ScriptedPrompter::default();

        let err = run_update(&mut catalog, Some(1), None, Some(5), &mut prompter, &quiet_output()).unwrap_err();
        assert!(err.downcast_ref::<CatalogError>().is_some_and(CatalogError::is_not_found));
    }

    #[test]
    fn test_update_empty_catalog_does_nothing() {
        let mut catalog = catalog_with(vec![]);
        let mut prompter = ScriptedPrompter::default();
        run_update(&mut catalog, None, None, None, &mut prompter, &quiet_output()).unwrap();
        assert!(prompter.prompts.is_empty());
    }
}
