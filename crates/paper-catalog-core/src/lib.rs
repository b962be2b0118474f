//! # Paper Catalog Core
//!
//! Runtime-free logic for Paper Catalog: the entry model, facet
//! derivation, the filter/search engine, browsing sessions, and the
//! catalog source trait.
//!
//! This crate contains no tokio, HTTP, or filesystem dependencies. The
//! `paper-catalog` application crate supplies concrete sources and the
//! CLI/HTTP presentation layers.
//!
//! ## Example
//!
//! ```rust
//! use paper_catalog_core::engine::CatalogEngine;
//! use paper_catalog_core::filter::FilterState;
//!
//! let body = br#"[
//!   {"title": "DBMS 2022", "branch": "CS,IS", "semester": "5",
//!    "subject": "Databases", "year": "2022", "link": "a.pdf"},
//!   {"title": "Networks 2021", "branch": "EC", "semester": "5",
//!    "subject": "Networking", "year": 2021, "link": "b.pdf"}
//! ]"#;
//!
//! let mut engine = CatalogEngine::new();
//! engine.load_json(body).unwrap();
//!
//! let state = FilterState {
//!     branch: Some("cs".into()),
//!     ..Default::default()
//! };
//! assert_eq!(engine.filter(&state).len(), 1);
//! assert_eq!(engine.search("network")[0].title(), "Networks 2021");
//! assert_eq!(engine.facets().years, vec!["2022", "2021"]);
//! ```

pub mod engine;
pub mod error;
pub mod facets;
pub mod filter;
pub mod models;
pub mod session;
pub mod source;
