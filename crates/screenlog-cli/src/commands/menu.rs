use super::add::{run_add, AddArgs};
use super::delete::run_delete;
use super::prompts::Prompter;
use super::update::run_update;
use super::view::{run_filter, run_list, run_ranking, run_search, run_sort, run_stats};
use crate::output::Output;
use color_eyre::Result;
use dialoguer::console::Term;
use media_catalog_core::{CatalogError, CatalogStore, MediaCatalog, SortKey};
use std::io::IsTerminal;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Add,
    List,
    Update,
    Filter,
    Search,
    Sort,
    Stats,
    Ranking,
    Delete,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 10] = [
        MenuAction::Add,
        MenuAction::List,
        MenuAction::Update,
        MenuAction::Filter,
        MenuAction::Search,
        MenuAction::Sort,
        MenuAction::Stats,
        MenuAction::Ranking,
        MenuAction::Delete,
        MenuAction::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::Add => "1. Register new media",
            MenuAction::List => "2. List all media",
            MenuAction::Update => "3. Update (episodes/rating)",
            MenuAction::Filter => "4. Filter by genre or platform",
            MenuAction::Search => "5. Search by title",
            MenuAction::Sort => "6. Sort list",
            MenuAction::Stats => "7. Detailed statistics",
            MenuAction::Ranking => "8. Top rated",
            MenuAction::Delete => "9. Delete media",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Interactive loop: pick an action, run it, then ask whether to return to the menu.
pub fn run_menu<S: CatalogStore>(
    catalog: &mut MediaCatalog<S>,
    default_sort: Option<SortKey>,
    prompter: &mut dyn Prompter,
    output: &Output,
) -> Result<()> {
    let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.label().to_string()).collect();

    loop {
        if output.is_human() && std::io::stdout().is_terminal() {
            // Cosmetic only
            let _ = Term::stdout().clear_screen();
        }

        let action = MenuAction::ALL[prompter.select("Movie & Series Catalog - Main Menu", &labels)?];
        debug!(?action, "Menu selection");

        if action == MenuAction::Exit {
            output.info("Exiting... See you next time!");
            return Ok(());
        }

        let result = match action {
            MenuAction::Add => run_add(catalog, AddArgs::default(), prompter, output),
            MenuAction::List => run_list(catalog, default_sort, output),
            MenuAction::Update => run_update(catalog, None, None, None, prompter, output),
            MenuAction::Filter => run_filter(catalog, None, prompter, output),
            MenuAction::Search => run_search(catalog, None, prompter, output),
            MenuAction::Sort => run_sort(catalog, None, prompter, output),
            MenuAction::Stats => run_stats(catalog, output),
            MenuAction::Ranking => run_ranking(catalog, output),
            MenuAction::Delete => run_delete(catalog, None, false, prompter, output),
            MenuAction::Exit => Ok(()),
        };

        // Catalog errors are reported and the loop goes on; anything else (a broken terminal) ends it
        if let Err(e) = result {
            match e.downcast_ref::<CatalogError>() {
                Some(catalog_error) => output.error(catalog_error.to_string()),
                None => return Err(e),
            }
        }

        if !prompter.confirm("Back to the main menu?", true)? {
            output.info("See you next time!");
            return Ok(());
        }
    }
}
