//! # Paper Catalog CLI (`papers`)
//!
//! Browse a library portal's paper catalog from the terminal or serve it
//! over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! papers --config ./config/papers.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `papers check` | Load the catalog and report how many papers it holds |
//! | `papers facets` | List the values offered by each filter |
//! | `papers list` | Filter papers by branch, semester, subject, and year |
//! | `papers search "<query>"` | Free-text search over title, branch, subject, year |
//! | `papers browse` | Interactive session driven by stdin |
//! | `papers serve` | Start the JSON HTTP API |
//! | `papers completions <shell>` | Print shell completions |

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use paper_catalog::search::OutputFormat;
use paper_catalog::{browse, config, search, server, sources};
use paper_catalog_core::filter::FilterState;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Paper Catalog: facet filtering and search over a static paper collection.
#[derive(Parser)]
#[command(name = "papers", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/papers.toml`. A missing file falls back to
    /// built-in defaults (catalog at `./papers.json`).
    #[arg(long, global = true, default_value = "./config/papers.toml")]
    config: PathBuf,

    /// Catalog location (path or http(s) URL), overriding `[source].location`.
    #[arg(long, global = true)]
    source: Option<String>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog and report the result.
    Check,

    /// List facet values in filter order.
    Facets {
        /// Print the facet set as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show papers matching facet selections.
    ///
    /// Branch and subject match any token containing the value
    /// (case-insensitive); semester and year must match exactly.
    List {
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        semester: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Free-text search over title, branch, subject, and year.
    Search {
        /// The search query string. Empty shows every paper.
        query: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Interactive browsing session on stdin.
    Browse,

    /// Start the JSON HTTP API on `[server].bind`.
    Serve,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "paper_catalog={0},paper_catalog_core={0}",
            log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "papers",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(location) = cli.source {
        cfg.source.location = location;
    }

    match cli.command {
        Commands::Check => {
            sources::run_check(&cfg).await?;
        }
        Commands::Facets { json } => {
            search::run_facets(&cfg, json).await?;
        }
        Commands::List {
            branch,
            semester,
            subject,
            year,
            format,
        } => {
            let state = FilterState {
                branch,
                semester,
                subject,
                year,
                ..Default::default()
            };
            search::run_list(&cfg, state, format).await?;
        }
        Commands::Search { query, format } => {
            search::run_search(&cfg, &query, format).await?;
        }
        Commands::Browse => {
            browse::run_browse(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
