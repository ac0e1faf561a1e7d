//! Command-line interface for the BGG client.

use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::client::BggClient;
use crate::config::{validate_thing_id, Settings};
use crate::error::{BggError, Result};
use crate::models::{Collection, Game, SearchResponse};

/// BoardGameGeek XML API client.
#[derive(Parser)]
#[command(name = "bgg-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Bypass the response cache.
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch games by BGG ID.
    Thing {
        /// One or more BGG thing IDs (e.g., 266192)
        #[arg(required = true)]
        ids: Vec<String>,

        /// Skip rating statistics
        #[arg(long)]
        no_stats: bool,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Search board games by name.
    Search {
        query: String,

        /// Only exact name matches
        #[arg(long)]
        exact: bool,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Fetch a user's collection.
    Collection {
        /// BGG username (default: BGG_USERNAME)
        username: Option<String>,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Remove all cached responses.
    ClearCache,
}

/// Run the CLI with the given settings.
pub fn run(settings: Settings) -> Result<()> {
    let cli = Cli::parse();
    let settings = if cli.no_cache {
        settings.with_cache_enabled(false)
    } else {
        settings
    };

    match cli.command {
        Commands::Thing {
            ids,
            no_stats,
            json,
        } => thing_command(settings, &ids, !no_stats, json),
        Commands::Search { query, exact, json } => search_command(settings, &query, exact, json),
        Commands::Collection { username, json } => {
            collection_command(settings, username.as_deref(), json)
        }
        Commands::ClearCache => clear_cache_command(settings),
    }
}

fn thing_command(settings: Settings, ids: &[String], include_stats: bool, json: bool) -> Result<()> {
    // Validate before making HTTP requests
    let ids = ids
        .iter()
        .map(|id| validate_thing_id(id))
        .collect::<Result<Vec<_>>>()?;

    let client = BggClient::new(settings)?;
    let games = with_spinner("Fetching games...", || client.get_things(&ids, include_stats))?;

    if json {
        return print_json(&games);
    }
    if games.is_empty() {
        println!("{}", style("No games found").yellow());
        return Ok(());
    }
    for game in &games {
        print_game(game);
    }
    Ok(())
}

fn search_command(settings: Settings, query: &str, exact: bool, json: bool) -> Result<()> {
    let client = BggClient::new(settings)?;
    let response = with_spinner("Searching...", || client.search(query, exact))?;

    if json {
        return print_json(&response);
    }
    print_search(query, &response);
    Ok(())
}

fn collection_command(settings: Settings, username: Option<&str>, json: bool) -> Result<()> {
    let username = username
        .map(str::to_string)
        .or_else(|| settings.username.clone())
        .ok_or_else(|| {
            BggError::Config("no username given and BGG_USERNAME is not set".to_string())
        })?;

    let client = BggClient::new(settings)?;
    let collection = with_spinner("Fetching collection...", || {
        client.get_collection(&username)
    })?;

    if json {
        return print_json(&collection);
    }
    print_collection(&collection);
    Ok(())
}

fn clear_cache_command(settings: Settings) -> Result<()> {
    let client = BggClient::new(settings)?;
    let removed = client.clear_cache()?;
    println!(
        "{} {} cached responses",
        style("Removed").green().bold(),
        removed
    );
    Ok(())
}

/// Run `task` behind a spinner, clearing it whatever the outcome.
fn with_spinner<T>(message: &'static str, task: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = task();
    pb.finish_and_clear();
    result
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_game(game: &Game) {
    println!(
        "{} {}",
        style(game.primary_name()).bold(),
        style(format!("(#{})", game.id())).dim()
    );
    if let Some(year) = game.year_published() {
        println!("  Year: {year}");
    }
    match (game.min_players(), game.max_players()) {
        (Some(min), Some(max)) if min == max => println!("  Players: {min}"),
        (Some(min), Some(max)) => println!("  Players: {min}-{max}"),
        _ => {}
    }
    if let Some(time) = game.playing_time() {
        println!("  Playing time: {time} min");
    }
    if let Some(rating) = game.average_rating() {
        println!("  Rating: {}", style(format!("{rating:.2}")).green());
    }
    if let Some(weight) = game.average_weight() {
        println!("  Weight: {weight:.2}");
    }
    if let Some(rank) = game.bgg_rank() {
        println!("  Rank: {}", style(rank).cyan());
    }
    let designers = join_values(game.designers().iter().map(|l| l.value()));
    if !designers.is_empty() {
        println!("  Designers: {designers}");
    }
    let categories = join_values(game.categories().iter().map(|l| l.value()));
    if !categories.is_empty() {
        println!("  Categories: {categories}");
    }
    println!();
}

fn print_search(query: &str, response: &SearchResponse) {
    println!(
        "{} results for {}",
        style(response.total()).bold(),
        style(query).cyan()
    );
    for result in response.results() {
        let year = result
            .year_published()
            .map(|y| format!(" ({y})"))
            .unwrap_or_default();
        println!(
            "  {:>8}  {}{}",
            style(result.id()).dim(),
            result.name(),
            year
        );
    }
}

fn print_collection(collection: &Collection) {
    println!(
        "{} {} items",
        style(collection.username().unwrap_or("collection")).bold(),
        collection.total_items()
    );
    for item in collection.items() {
        let rating = item
            .rating()
            .map(|r| format!("  {}", style(format!("{r:.1}")).green()))
            .unwrap_or_default();
        let owned = if item.status().own() { "*" } else { " " };
        println!("  {owned} {}{rating}", item.name());
    }
}

fn join_values<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}
