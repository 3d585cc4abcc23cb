//! Content persistence boundaries.
//!
//! The pipeline produces values and hands them across these traits; the
//! storage mechanism behind them (JSON directory, database, remote API) is
//! outside core scope.

use super::model::{ParsedContent, StoredPrompt};
use crate::error::Result;

/// An abstract repository for stored prompt records.
///
/// The pipeline emits one `create` per completed generation batch and one
/// `update_content` per accepted refinement. It never deletes.
#[async_trait::async_trait]
pub trait PromptRepository: Send + Sync {
    /// Persists a new record.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Record saved successfully
    /// - `Err(RoteiroError)`: Error if the save fails
    async fn create(&self, prompt: &StoredPrompt) -> Result<()>;

    /// Retrieves a record by its identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StoredPrompt))`: The record exists
    /// - `Ok(None)`: No record with this identifier
    /// - `Err(RoteiroError)`: Error if retrieval fails
    async fn find_by_id(&self, id: &str) -> Result<Option<StoredPrompt>>;

    /// Replaces the structured content of an existing record.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Content replaced and `updated_at` refreshed
    /// - `Err(RoteiroError::NotFound)`: No record with this identifier
    /// - `Err(RoteiroError)`: Error if the update fails
    async fn update_content(&self, id: &str, content: &ParsedContent) -> Result<()>;
}

/// Lookup of per-platform format templates.
///
/// Keys are matched against the lower-cased platform identifier. A missing
/// entry is not an error: the empty string is a valid "no format hint"
/// template.
#[async_trait::async_trait]
pub trait PlatformFormatRepository: Send + Sync {
    /// Returns the format template for a platform, or `""` when none is
    /// configured.
    async fn format_for(&self, platform: &str) -> Result<String>;
}
