//! JSON-directory PromptRepository implementation.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! └── prompts/
//!     ├── <uuid-1>.json
//!     └── <uuid-2>.json
//! ```

use crate::paths::{RoteiroPaths, ServiceType};
use async_trait::async_trait;
use roteiro_core::content::{ParsedContent, PromptRepository, StoredPrompt};
use roteiro_core::error::{Result, RoteiroError};
use std::path::{Path, PathBuf};

/// One JSON file per stored prompt record.
pub struct JsonDirPromptRepository {
    dir: PathBuf,
}

impl JsonDirPromptRepository {
    /// Creates a repository at the default location
    /// (~/.config/roteiro/prompts/).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn default_location() -> Result<Self> {
        Self::new(None).await
    }

    /// Creates a repository with a custom base directory (for testing).
    pub async fn new(base_dir: Option<&Path>) -> Result<Self> {
        let dir = RoteiroPaths::new(base_dir)
            .get_path(ServiceType::Prompts)
            .map_err(|e| RoteiroError::io(e.to_string()))?;

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| RoteiroError::io(format!("Failed to create prompt storage: {e}")))?;

        Ok(Self { dir })
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn save(&self, prompt: &StoredPrompt) -> Result<()> {
        let serialized = serde_json::to_string_pretty(prompt)?;
        tokio::fs::write(self.record_path(&prompt.id), serialized)
            .await
            .map_err(|e| RoteiroError::data_access(format!("Failed to save prompt: {e}")))
    }
}

#[async_trait]
impl PromptRepository for JsonDirPromptRepository {
    async fn create(&self, prompt: &StoredPrompt) -> Result<()> {
        self.save(prompt).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredPrompt>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| RoteiroError::data_access(format!("Failed to read prompt: {e}")))?;
        let prompt = serde_json::from_str(&content)?;
        Ok(Some(prompt))
    }

    async fn update_content(&self, id: &str, content: &ParsedContent) -> Result<()> {
        let mut prompt = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RoteiroError::not_found("prompt", id))?;

        prompt.content = content.clone();
        prompt.updated_at = chrono::Utc::now().to_rfc3339();
        self.save(&prompt).await
    }
}
