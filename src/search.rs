//! `papers list`, `papers search`, and `papers facets` commands.
//!
//! Each command loads the configured catalog once, drives a
//! [`CatalogSession`] the way the catalog page would, and prints the
//! result in the requested [`OutputFormat`].

use anyhow::Result;
use clap::ValueEnum;
use paper_catalog_core::filter::{Facet, FilterState};
use paper_catalog_core::models::Entry;
use paper_catalog_core::session::{CatalogSession, Summary};
use serde::Serialize;

use crate::config::Config;
use crate::render::{self, FacetOptions};
use crate::sources;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// JSON object with `summary` and `papers`.
    Json,
    /// Paper card markup, one card per paper.
    Html,
}

/// JSON shape for `list` and `search` output.
#[derive(Debug, Serialize)]
pub struct ListResponse<'a> {
    pub summary: Summary,
    pub papers: Vec<&'a Entry>,
}

/// CLI entry point for `papers list`.
pub async fn run_list(config: &Config, state: FilterState, format: OutputFormat) -> Result<()> {
    let engine = sources::load_or_exit(config).await;
    let mut session = CatalogSession::with_policy(&engine, config.policy());
    for facet in Facet::ALL {
        if let Some(value) = state.get(facet) {
            session.select(facet, Some(value.to_string()));
        }
    }
    print_results(&session, format)
}

/// CLI entry point for `papers search`.
pub async fn run_search(config: &Config, query: &str, format: OutputFormat) -> Result<()> {
    let engine = sources::load_or_exit(config).await;
    let mut session = CatalogSession::with_policy(&engine, config.policy());
    session.set_search(query);
    print_results(&session, format)
}

/// CLI entry point for `papers facets`.
pub async fn run_facets(config: &Config, json: bool) -> Result<()> {
    let engine = sources::load_or_exit(config).await;
    let facets = engine.facets();

    if json {
        println!("{}", serde_json::to_string_pretty(facets)?);
        return Ok(());
    }

    let options = FacetOptions::new(facets);
    for (facet, opts) in [
        (Facet::Branch, &options.branch),
        (Facet::Semester, &options.semester),
        (Facet::Subject, &options.subject),
        (Facet::Year, &options.year),
    ] {
        let labels: Vec<&str> = opts.iter().map(|o| o.label.as_str()).collect();
        println!("{:<10} {}", facet, labels.join(", "));
    }
    Ok(())
}

fn print_results(session: &CatalogSession<'_>, format: OutputFormat) -> Result<()> {
    let visible = session.visible();
    let summary = session.summary();

    match format {
        OutputFormat::Json => {
            let resp = ListResponse {
                summary,
                papers: visible,
            };
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        OutputFormat::Html => {
            for card in render::cards(&visible) {
                println!("{}", render::render_card_html(&card)?);
            }
        }
        OutputFormat::Text => print_text(&visible, &summary),
    }
    Ok(())
}

pub fn print_text(visible: &[&Entry], summary: &Summary) {
    println!("{}", render::summary_line(summary));
    if visible.is_empty() {
        println!("No papers found.");
        return;
    }
    println!();
    for entry in visible {
        println!("{}", entry.title());
        println!(
            "  branch: {}  semester: {}  subject: {}  year: {}",
            entry.branch(),
            entry.semester(),
            entry.subject(),
            entry.year()
        );
        println!("  download: {}", render::download_href(entry));
    }
}

