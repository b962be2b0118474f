//! # Paper Catalog
//!
//! A library portal's paper catalog: load a static JSON collection of
//! question papers, derive filter facets, and serve filtered or searched
//! subsets to a CLI, an interactive browser, or an HTTP front end.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐
//! │   Sources    │──▶│  CatalogEngine   │──▶│  Session     │
//! │ file / HTTP  │   │ facets + filter  │   │ facet/search │
//! └──────────────┘   └──────────────────┘   └──────┬───────┘
//!                                                  │
//!                     ┌───────────────┬────────────┤
//!                     ▼               ▼            ▼
//!                ┌─────────┐    ┌──────────┐  ┌─────────┐
//!                │   CLI   │    │  browse  │  │  HTTP   │
//!                │(papers) │    │(debounce)│  │ (axum)  │
//!                └─────────┘    └──────────┘  └─────────┘
//! ```
//!
//! The engine, facet rules, and session live in the runtime-free
//! `paper-catalog-core` crate; this crate adds I/O and presentation.
//!
//! ## Quick Start
//!
//! ```bash
//! papers check                          # load papers.json and report
//! papers facets                         # list filter values
//! papers list --branch CS --semester 5  # facet filter
//! papers search "network"               # free-text search
//! papers browse                         # interactive session
//! papers serve                          # JSON API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`sources`] | File and HTTP catalog sources |
//! | [`render`] | HTML escaping, cards, counters, facet labels |
//! | [`debounce`] | Debounced search input |
//! | [`search`] | `list` / `search` / `facets` commands |
//! | [`browse`] | Interactive browser |
//! | [`server`] | HTTP API |

pub mod browse;
pub mod config;
pub mod debounce;
pub mod render;
pub mod search;
pub mod server;
pub mod sources;
