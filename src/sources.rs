//! Concrete catalog sources.
//!
//! The catalog location in `[source].location` selects the source: a
//! value starting with `http://` or `https://` is fetched with
//! [`HttpSource`], anything else is read from disk with [`FileSource`].
//! Both implement [`CatalogSource`] from the core crate.

use anyhow::Result;
use async_trait::async_trait;
use paper_catalog_core::engine::CatalogEngine;
use paper_catalog_core::error::LoadError;
use paper_catalog_core::source::{load_catalog, CatalogSource};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;

/// Reads the catalog from a local file.
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path,
        }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::Unreachable(format!("{}: {}", self.path.display(), e)))
    }
}

/// Fetches the catalog with a single HTTP GET.
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LoadError::Unreachable(e.to_string()))?;

        let resp = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Unreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| LoadError::Unreachable(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Builds the source named by the config.
pub fn source_from_config(config: &Config) -> Box<dyn CatalogSource> {
    let location = config.source.location.trim();
    if is_remote(location) {
        Box::new(HttpSource::new(location, config.timeout()))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Loads the configured catalog.
pub async fn load_configured(config: &Config) -> Result<CatalogEngine, LoadError> {
    let source = source_from_config(config);
    load_catalog(source.as_ref()).await
}

/// Loads the configured catalog, or prints the user-facing load error and
/// exits with status 1. Used by the CLI commands.
pub async fn load_or_exit(config: &Config) -> CatalogEngine {
    match load_configured(config).await {
        Ok(engine) => engine,
        Err(err) => exit_with_load_error(&err),
    }
}

fn exit_with_load_error(err: &LoadError) -> ! {
    println!("{}", LoadError::USER_MESSAGE);
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

/// CLI entry point for `papers check`.
///
/// Prints the number of loaded papers, or the user-facing load error and
/// exits with status 1.
pub async fn run_check(config: &Config) -> Result<()> {
    let source = source_from_config(config);
    match load_catalog(source.as_ref()).await {
        Ok(engine) => {
            println!("ok: {} papers loaded from {}", engine.len(), source.name());
            Ok(())
        }
        Err(err) => exit_with_load_error(&err),
    }
}
