//! Catalog source abstraction.
//!
//! A [`CatalogSource`] fetches the raw catalog body once per session. The
//! application crate provides filesystem and HTTP sources; this crate
//! ships [`StaticSource`] for tests and embedded catalogs.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

use async_trait::async_trait;

use crate::engine::CatalogEngine;
use crate::error::LoadError;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Display name used in logs and status output (a path or URL).
    fn name(&self) -> &str;

    /// Fetch the raw catalog body.
    async fn fetch(&self) -> Result<Vec<u8>, LoadError>;
}

/// A source serving a fixed in-memory body.
pub struct StaticSource {
    name: String,
    body: Vec<u8>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.body.clone())
    }
}

/// Fetches `source` and builds an engine from it.
///
/// This is the single I/O boundary of the catalog: it runs once, is never
/// retried, and either yields a fully loaded engine or a [`LoadError`].
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<CatalogEngine, LoadError> {
    let body = match source.fetch().await {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(source = source.name(), error = %err, "failed to fetch catalog");
            return Err(err);
        }
    };

    let mut engine = CatalogEngine::new();
    match engine.load_json(&body) {
        Ok(count) => {
            tracing::info!(source = source.name(), papers = count, "catalog loaded");
            Ok(engine)
        }
        Err(err) => {
            tracing::error!(source = source.name(), error = %err, "failed to parse catalog");
            Err(err)
        }
    }
}
