use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::Context;
use commands::add::{run_add, AddArgs};
use commands::delete::run_delete;
use commands::menu::run_menu;
use commands::prompts::TerminalPrompter;
use commands::update::run_update;
use commands::view::{run_filter, run_list, run_ranking, run_search, run_sort, run_stats};
use media_catalog_config::{Config, PathManager};
use media_catalog_core::{FilterField, JsonFileStore, MediaCatalog, SortKey};
use std::path::PathBuf;
use tracing::info;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "screenlog")]
#[command(about = "screenlog - keep track of the movies and series you watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Catalog file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default when no command is given)
    Menu,
    /// Register a new movie or series
    Add(AddArgs),
    /// List every entry
    List {
        /// Order of the listing: title, year or rating
        #[arg(long)]
        sort: Option<SortKey>,
    },
    /// Search entries by title
    Search {
        /// Part of the title, case-insensitive
        term: Option<String>,
    },
    /// Filter entries by genre or platform
    Filter(FilterArgs),
    /// List entries sorted by title, year or rating
    Sort {
        /// title, year or rating
        key: Option<SortKey>,
    },
    /// Totals and watch time
    Stats,
    /// Rated entries, best first
    Ranking,
    /// Update watched episodes and rating
    #[command(long_about = "Update how many episodes of a series you have watched and your rating. Without flags both are prompted for. A rating of 0 or outside 1-10 leaves the current rating unchanged.")]
    Update {
        /// Entry id; picked from a list when omitted
        id: Option<u64>,

        /// Episodes watched (series only)
        #[arg(long)]
        watched: Option<u32>,

        /// Rating from 1 to 10 (0 skips)
        #[arg(long, allow_negative_numbers = true)]
        rating: Option<i64>,
    },
    /// Delete an entry
    Delete {
        /// Entry id; picked from a list when omitted
        id: Option<u64>,

        /// Do not ask for confirmation
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Args)]
#[group(multiple = false)]
struct FilterArgs {
    /// Exact genre, case-insensitive
    #[arg(long)]
    genre: Option<String>,

    /// Part of the platform name, case-insensitive
    #[arg(long)]
    platform: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> Option<(FilterField, String)> {
        match (self.genre, self.platform) {
            (Some(genre), _) => Some((FilterField::Genre, genre)),
            (None, Some(platform)) => Some((FilterField::Platform, platform)),
            (None, None) => None,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.apply_env_overrides();

    logging::init_logging(cli.verbose, cli.quiet, config.logging.file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let catalog_file = config.catalog_file(cli.file.as_deref(), &path_manager);
    info!("Using catalog file {}", catalog_file.display());
    let mut catalog = MediaCatalog::open(JsonFileStore::new(catalog_file));

    let default_sort = config
        .display
        .default_sort
        .as_deref()
        .map(str::parse::<SortKey>)
        .transpose()
        .map_err(|e| color_eyre::eyre::eyre!(e))
        .wrap_err("Invalid display.default_sort in config")?;

    let mut prompter = TerminalPrompter;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => run_menu(&mut catalog, default_sort, &mut prompter, &output),
        Commands::Add(args) => run_add(&mut catalog, args, &mut prompter, &output),
        Commands::List { sort } => run_list(&catalog, sort.or(default_sort), &output),
        Commands::Search { term } => run_search(&catalog, term, &mut prompter, &output),
        Commands::Filter(args) => run_filter(&catalog, args.into_filter(), &mut prompter, &output),
        Commands::Sort { key } => run_sort(&catalog, key, &mut prompter, &output),
        Commands::Stats => run_stats(&catalog, &output),
        Commands::Ranking => run_ranking(&catalog, &output),
        Commands::Update { id, watched, rating } => {
            run_update(&mut catalog, id, watched, rating, &mut prompter, &output)
        }
        Commands::Delete { id, yes } => run_delete(&mut catalog, id, yes, &mut prompter, &output),
    }
}
