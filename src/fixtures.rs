//! A [`DesignSource`] that reads saved API responses from a directory.
//!
//! The directory holds `file.json`, `styles.json`, and optionally
//! `components.json` and `variables.json`, each shaped like the matching
//! Figma endpoint response. The file key is ignored.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::figma::{ComponentsResponse, FigmaFile, StylesResponse, VariablesResponse};
use crate::figma_client::DesignSource;

/// Environment variable that points the CLI at a fixture directory instead of
/// the Figma API.
pub const MOCK_FIGMA_DIR_ENV: &str = "DTX_MOCK_FIGMA_DIR";

#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Source configured through [`MOCK_FIGMA_DIR_ENV`], if set.
    pub fn from_env() -> Option<Self> {
        std::env::var(MOCK_FIGMA_DIR_ENV)
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        log::debug!("reading fixture {}", path.display());
        let text = tokio::fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl DesignSource for DirectorySource {
    async fn fetch_file(&self, _file_key: &str) -> Result<FigmaFile> {
        self.read_json("file.json").await
    }

    async fn fetch_styles(&self, _file_key: &str) -> Result<StylesResponse> {
        self.read_json("styles.json").await
    }

    async fn fetch_components(&self, _file_key: &str) -> Result<ComponentsResponse> {
        self.read_json("components.json").await
    }

    async fn fetch_local_variables(&self, _file_key: &str) -> Result<VariablesResponse> {
        self.read_json("variables.json").await
    }
}
