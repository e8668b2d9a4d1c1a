use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use stanza_gateway::catalog::ProxyCatalog;
use stanza_gateway::config::watcher::StanzaWatcher;
use stanza_gateway::config::{load_config, GatewayConfig};
use stanza_gateway::observability::logging::init_logging;
use stanza_gateway::routing::{canonicalize_origin, origin_matches, SearchQuery};
use stanza_gateway::stanza::StanzaParser;

#[derive(Parser)]
#[command(name = "stanza-cli")]
#[command(about = "Inspect and rearrange proxy stanza files", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stanza file (overrides the configured source).
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stanzas, optionally filtered by name prefix and/or URL
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Show one stanza by position
    Show { position: usize },
    /// Show the origins of one stanza
    Origins { position: usize },
    /// Print the canonical stanza file
    Render,
    /// Move a stanza and print the resulting file
    Move { from: usize, to: usize },
    /// Remove a stanza and print the resulting file
    Remove { position: usize },
    /// Check whether a URL falls under an origin
    Match { url: String, origin: String },
    /// Reload and summarize the stanza file whenever it changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    init_logging(&config.observability.log_level);

    let parser = StanzaParser::new(config.parser);
    let path = cli.file.unwrap_or_else(|| config.source.stanza_path());

    let load = || ProxyCatalog::load_file(&path, parser);

    match cli.command {
        Commands::List { name, url } => {
            let query = SearchQuery {
                name,
                url,
                ignore_case: config.search.ignore_case,
            };
            print_json(&load()?.summaries(&query))?;
        }
        Commands::Show { position } => {
            print_json(&load()?.detail(position)?)?;
        }
        Commands::Origins { position } => {
            print_json(&load()?.detail(position)?.origins)?;
        }
        Commands::Render => {
            print!("{}", load()?.render());
        }
        Commands::Move { from, to } => {
            let mut catalog = load()?;
            catalog.move_stanza(from, to)?;
            print!("{}", catalog.render());
        }
        Commands::Remove { position } => {
            let mut catalog = load()?;
            let removed = catalog.remove(position)?;
            tracing::info!(position, name = %removed.name, "Removed stanza");
            print!("{}", catalog.render());
        }
        Commands::Match { url, origin } => {
            let canonical = canonicalize_origin(&origin)?;
            let matches = origin_matches(&url, &origin);
            print_json(&serde_json::json!({
                "url": url,
                "origin": canonical,
                "matches": matches,
            }))?;
        }
        Commands::Watch => {
            let mut catalog = load()?;
            let (watcher, mut updates) = StanzaWatcher::new(&path, parser);
            let _handle = watcher.run()?;
            tracing::info!(stanzas = catalog.len(), "Watching stanza file");

            while let Some(stanzas) = updates.recv().await {
                catalog.replace_all(stanzas);
                print_json(&catalog.summaries(&SearchQuery::default()))?;
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
