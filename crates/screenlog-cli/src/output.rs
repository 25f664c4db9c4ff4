use clap::ValueEnum;
use comfy_table::{presets, modifiers, Attribute, Cell, CellAlignment, Color, Table};
use media_catalog_core::{CatalogStats, RankedItem};
use media_catalog_models::{MediaItem, MediaKind};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", msg.as_ref(), |m| println!("{} {}", "✓".green(), m));
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", msg.as_ref(), |m| println!("{}", m));
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", msg.as_ref(), |m| println!("{} {}", "⚠".yellow(), m));
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "error", "message": msg.as_ref() }));
            }
        }
    }

    fn message(&self, kind: &str, msg: &str, human: impl FnOnce(&str)) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => human(msg),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": kind, "message": msg }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }

    /// Print a list of catalog entries, one block per entry.
    pub fn media_list(&self, items: &[&MediaItem]) {
        if !self.is_human() {
            self.json(&json!({ "type": "media", "items": items }));
            return;
        }
        if self.quiet {
            return;
        }

        println!("\n{}", "=== MEDIA LIST ===".bright_cyan().bold());
        for item in items {
            println!("{}", format_media(item));
        }
        println!();
    }

    pub fn stats(&self, stats: &CatalogStats) {
        let watch_time = stats.watch_time();
        if !self.is_human() {
            self.json(&json!({
                "type": "stats",
                "stats": stats,
                "watch_time": watch_time,
                "watch_time_display": watch_time.to_string(),
            }));
            return;
        }
        if self.quiet {
            return;
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec![
            Cell::new("Statistics").fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new(""),
        ]);
        table.add_row(vec![Cell::new("Total media"), Cell::new(stats.total)]);
        table.add_row(vec![Cell::new("Series"), Cell::new(stats.series)]);
        table.add_row(vec![Cell::new("Movies"), Cell::new(stats.movies)]);
        table.add_row(vec![Cell::new("Time watched"), Cell::new(watch_time)]);
        table.add_row(vec![Cell::new("Episodes watched"), Cell::new(stats.episodes_watched)]);
        println!("{}", table);
    }

    pub fn ranking(&self, ranked: &[RankedItem<'_>]) {
        if !self.is_human() {
            let entries: Vec<_> = ranked
                .iter()
                .map(|r| json!({ "position": r.position, "rating": r.rating, "item": r.item }))
                .collect();
            self.json(&json!({ "type": "ranking", "items": entries }));
            return;
        }
        if self.quiet {
            return;
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Rating").add_attribute(Attribute::Bold),
        ]);
        for entry in ranked {
            table.add_row(vec![
                Cell::new(entry.position).set_alignment(CellAlignment::Right),
                Cell::new(&entry.item.title),
                Cell::new(format!("⭐ {}", entry.rating)).fg(Color::Yellow),
            ]);
        }
        println!("\n{}", "=== TOP RATED ===".bright_yellow().bold());
        println!("{}", table);
    }
}

pub fn format_media(item: &MediaItem) -> String {
    let progress = match item.kind {
        MediaKind::Series {
            total_episodes,
            watched_episodes,
            episode_minutes,
            ..
        } => format!(
            "   {}/{} episodes watched | {} min/ep",
            watched_episodes, total_episodes, episode_minutes
        ),
        MediaKind::Movie { runtime_minutes } => format!("   Duration: {} min", runtime_minutes),
    };
    let rating = item
        .rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "\n{} ({}) - {} {}\n   Genres: {}\n   Platform: {}\n{}\n   Rating: {}",
        item.title.bold(),
        item.release_year,
        item.media_type().to_string().to_uppercase(),
        format!("[{}]", item.id).dimmed(),
        item.genres_joined(),
        item.platform,
        progress,
        rating
    )
}
