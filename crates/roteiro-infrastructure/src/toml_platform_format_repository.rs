//! TOML-backed platform format templates.

use crate::paths::{RoteiroPaths, ServiceType};
use async_trait::async_trait;
use roteiro_core::content::PlatformFormatRepository;
use roteiro_core::error::{Result, RoteiroError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File layout:
///
/// ```toml
/// [formats]
/// tiktok = "Vídeo curto, 30-60s, cortes rápidos."
/// youtube = "Roteiro para vídeo de 8-12 minutos."
/// ```
#[derive(Deserialize, Serialize, Debug, Default)]
struct FormatsRoot {
    #[serde(default)]
    formats: BTreeMap<String, String>,
}

/// TOML file implementation of [`PlatformFormatRepository`].
///
/// Keys in the file are expected lower-cased; lookups lower-case the incoming
/// platform identifier. A missing file or missing entry yields the empty
/// string, never an error.
pub struct TomlPlatformFormatRepository {
    path: PathBuf,
}

impl TomlPlatformFormatRepository {
    /// Creates a repository at the default location
    /// (~/.config/roteiro/formats.toml).
    pub fn default_location() -> Result<Self> {
        let path = RoteiroPaths::new(None)
            .get_path(ServiceType::PlatformFormats)
            .map_err(|e| RoteiroError::io(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a repository reading from a custom path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PlatformFormatRepository for TomlPlatformFormatRepository {
    async fn format_for(&self, platform: &str) -> Result<String> {
        if !Path::new(&self.path).exists() {
            return Ok(String::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let root: FormatsRoot = toml::from_str(&content)?;

        Ok(root
            .formats
            .get(&platform.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}
