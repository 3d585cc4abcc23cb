//! TOML-backed model configuration store.
//!
//! Reads model rows from models.toml and exposes the one marked active.
//! The file is administered out-of-band; this repository never writes.

use crate::paths::{RoteiroPaths, ServiceType};
use async_trait::async_trait;
use roteiro_core::error::{Result, RoteiroError};
use roteiro_core::model_config::{ActiveModelRow, ModelConfigRepository};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File layout:
///
/// ```toml
/// [[model]]
/// name = "gpt-4o"
/// active = true
///
/// [model.settings]
/// temperature = 0.8
/// max_tokens = 2048
/// top_p = 0.95
/// frequency_penalty = 0.3
/// presence_penalty = 0.4
/// ```
#[derive(Deserialize, Serialize, Debug, Default)]
struct ModelsRoot {
    #[serde(rename = "model", default)]
    models: Vec<ModelRowDto>,
}

#[derive(Deserialize, Serialize, Debug)]
struct ModelRowDto {
    name: String,
    #[serde(default)]
    active: bool,
    settings: Option<toml::Value>,
}

/// TOML file implementation of [`ModelConfigRepository`].
pub struct TomlModelConfigRepository {
    path: PathBuf,
}

impl TomlModelConfigRepository {
    /// Creates a repository at the default location
    /// (~/.config/roteiro/models.toml).
    pub fn default_location() -> Result<Self> {
        let path = RoteiroPaths::new(None)
            .get_path(ServiceType::ModelConfig)
            .map_err(|e| RoteiroError::io(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a repository reading from a custom path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_rows(&self) -> Result<Vec<ModelRowDto>> {
        if !Path::new(&self.path).exists() {
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let root: ModelsRoot = toml::from_str(&content)?;
        Ok(root.models)
    }
}

#[async_trait]
impl ModelConfigRepository for TomlModelConfigRepository {
    async fn find_active(&self) -> Result<Option<ActiveModelRow>> {
        let rows = self.read_rows().await?;

        let Some(row) = rows.into_iter().find(|row| row.active) else {
            return Ok(None);
        };

        // toml::Value serializes cleanly into a JSON value; a row without a
        // settings table becomes Null and fails later at resolution, which is
        // the configured-incompletely case, not a data-access failure.
        let settings = match row.settings {
            Some(value) => serde_json::to_value(value)
                .map_err(|e| RoteiroError::data_access(format!("model settings: {e}")))?,
            None => serde_json::Value::Null,
        };

        Ok(Some(ActiveModelRow {
            model_name: row.name,
            settings,
        }))
    }
}
