//! Presentation helpers shared by the CLI and HTTP server.
//!
//! Turns engine output into display-ready values: HTML-escaped cards,
//! download links with the legacy `file` fallback, facet option labels,
//! and the result counter line.

use askama::Template;
use paper_catalog_core::facets::FacetSet;
use paper_catalog_core::filter::Facet;
use paper_catalog_core::models::Entry;
use paper_catalog_core::session::Summary;
use serde::Serialize;

/// Placeholder href for entries without a download location.
pub const MISSING_HREF: &str = "#";

/// Upper bound on the staggered reveal delay of a card.
const MAX_ANIMATE_DELAY_MS: u64 = 400;

/// One rendered paper card. Text fields are already HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub branch: String,
    pub semester: String,
    pub subject: String,
    pub year: String,
    pub href: String,
    /// Reveal delay for the card's entrance animation.
    pub animate_delay_ms: u64,
}

impl Card {
    pub fn new(entry: &Entry, index: usize) -> Self {
        Self {
            title: escape_html(entry.title()),
            branch: escape_html(entry.branch()),
            semester: escape_html(entry.semester()),
            subject: escape_html(entry.subject()),
            year: escape_html(entry.year()),
            href: escape_html(download_href(entry)),
            animate_delay_ms: (index as u64)
                .saturating_mul(100)
                .min(MAX_ANIMATE_DELAY_MS),
        }
    }
}

pub fn cards(entries: &[&Entry]) -> Vec<Card> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| Card::new(e, i))
        .collect()
}

/// Neutralizes the characters that are unsafe in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `link` if present, else the legacy `file`, else [`MISSING_HREF`].
pub fn download_href(entry: &Entry) -> &str {
    entry.link().or(entry.file()).unwrap_or(MISSING_HREF)
}

// Card fields are escaped once in `Card::new`, so they pass through `safe`.
#[derive(Template)]
#[template(
    source = r#"<div class="paper-card" data-animate="zoom-in" data-delay="{{ card.animate_delay_ms }}">
    <div>
        <h4>{{ card.title|safe }}</h4>
        <div class="paper-meta">
            <span><strong>Branch:</strong> {{ card.branch|safe }}</span>
            <span><strong>Semester:</strong> {{ card.semester|safe }}</span>
            <span><strong>Subject:</strong> {{ card.subject|safe }}</span>
            <span><strong>Year:</strong> {{ card.year|safe }}</span>
        </div>
    </div>
    <a href="{{ card.href|safe }}" target="_blank" rel="noopener noreferrer" class="download-btn">
        Download PDF
    </a>
</div>"#,
    ext = "html"
)]
struct CardTemplate<'a> {
    card: &'a Card,
}

pub fn render_card_html(card: &Card) -> Result<String, askama::Error> {
    CardTemplate { card }.render()
}

/// Result counter text.
pub fn summary_line(summary: &Summary) -> String {
    if summary.filtered {
        format!("Showing {} of {} papers", summary.visible, summary.total)
    } else {
        format!("Showing {} papers", summary.total)
    }
}

pub fn semester_label(semester: &str) -> String {
    format!("Semester {}", semester)
}

/// One selectable option of a facet control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// Options for every facet control, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub branch: Vec<FacetOption>,
    pub semester: Vec<FacetOption>,
    pub subject: Vec<FacetOption>,
    pub year: Vec<FacetOption>,
}

impl FacetOptions {
    pub fn new(facets: &FacetSet) -> Self {
        let build = |facet: Facet| -> Vec<FacetOption> {
            facets
                .values(facet)
                .iter()
                .map(|v| FacetOption {
                    value: v.clone(),
                    label: match facet {
                        Facet::Semester => semester_label(v),
                        _ => v.clone(),
                    },
                })
                .collect()
        };
        Self {
            branch: build(Facet::Branch),
            semester: build(Facet::Semester),
            subject: build(Facet::Subject),
            year: build(Facet::Year),
        }
    }
}
