//! Interactive catalog browser (`papers browse`).
//!
//! Reads one command per line from stdin and drives a [`CatalogSession`],
//! printing the visible papers after every change. Search commands pass
//! through the [`Debouncer`], so a burst of search lines (for example,
//! pasted input) only evaluates the last one.
//!
//! ```text
//! branch CS          select a branch
//! semester 5         select a semester
//! all subject        lift the subject constraint
//! search network     free-text search (debounced)
//! clear              reset all selectors and search
//! facets             list available facet values
//! show               reprint the current results
//! quit
//! ```

use anyhow::Result;
use paper_catalog_core::engine::CatalogEngine;
use paper_catalog_core::filter::Facet;
use paper_catalog_core::session::{CatalogSession, LatestResult, Ticket};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::render::FacetOptions;
use crate::search::print_text;
use crate::sources;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Facet, Option<String>),
    Search(String),
    Clear,
    Facets,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "search" | "/" => Command::Search(rest.to_string()),
        "all" => Command::Select(rest.parse()?, None),
        "clear" => Command::Clear,
        "facets" => Command::Facets,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            let facet: Facet = other
                .parse()
                .map_err(|_| format!("unknown command: '{}'. Type `help`.", other))?;
            if rest.is_empty() {
                return Err(format!("usage: {} <value>  (or `all {}`)", facet, facet));
            }
            Command::Select(facet, Some(rest.to_string()))
        }
    };
    Ok(Some(cmd))
}

enum Event {
    Line(String),
    Search(Ticket, String),
    Eof,
}

/// CLI entry point for `papers browse`.
pub async fn run_browse(config: &Config) -> Result<()> {
    let engine = sources::load_or_exit(config).await;
    browse(&engine, config).await
}

async fn browse(engine: &CatalogEngine, config: &Config) -> Result<()> {
    let mut session = CatalogSession::with_policy(engine, config.policy());
    let debouncer = Debouncer::new(config.debounce());
    let mut latest = LatestResult::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let reader_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if reader_tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = reader_tx.send(Event::Eof);
    });

    // Dropped at end of input; the channel then closes once every pending
    // debounced search has delivered or been superseded.
    let mut tx = Some(tx);

    show(&session);

    while let Some(event) = rx.recv().await {
        let cmd = match event {
            Event::Search(ticket, query) => {
                if latest.offer(ticket, query) {
                    if let Some(query) = latest.get() {
                        session.set_search(query.clone());
                        show(&session);
                    }
                }
                continue;
            }
            Event::Eof => {
                tx = None;
                continue;
            }
            Event::Line(line) => match parse_command(&line) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(msg) => {
                    eprintln!("{}", msg);
                    continue;
                }
            },
        };

        match cmd {
            Command::Search(query) => {
                let Some(search_tx) = tx.clone() else {
                    continue;
                };
                // The ticket is issued here, in input order, before the task
                // is scheduled.
                let ticket = debouncer.ticket();
                let d = debouncer.clone();
                tokio::spawn(async move {
                    if let Some(query) = d.wait(ticket, query).await {
                        let _ = search_tx.send(Event::Search(ticket, query));
                    }
                });
            }
            Command::Select(facet, value) => {
                session.select(facet, value);
                show(&session);
            }
            Command::Clear => {
                session.clear();
                show(&session);
            }
            Command::Facets => print_facets(engine),
            Command::Show => show(&session),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn show(session: &CatalogSession<'_>) {
    print_text(&session.visible(), &session.summary());
    println!();
}

fn print_facets(engine: &CatalogEngine) {
    let options = FacetOptions::new(engine.facets());
    let join = |opts: &[crate::render::FacetOption]| {
        opts.iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("branch    {}", join(&options.branch));
    println!("semester  {}", join(&options.semester));
    println!("subject   {}", join(&options.subject));
    println!("year      {}", join(&options.year));
}

const HELP: &str = "\
commands:
  branch|semester|subject|year <value>   select a facet value
  all <facet>                            lift a facet constraint
  search <text>                          free-text search
  clear                                  reset everything
  facets                                 list facet values
  show                                   reprint results
  quit";
