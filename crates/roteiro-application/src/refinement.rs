//! Refinement round-trips over existing content.
//!
//! Unlike first-time generation, a refinement that silently degraded to
//! empty content would destroy previously-good stored content, so the parsed
//! result passes a structural-completeness gate before it is accepted.

use crate::prompt;
use roteiro_core::content::{ParsedContent, PlatformFormatRepository, RefinementRequest};
use roteiro_core::error::{Result, RoteiroError};
use roteiro_core::model_config::{self, ModelConfigRepository};
use roteiro_interaction::{CompletionProvider, CompletionRequest};
use std::sync::Arc;

/// Service applying natural-language edits to existing content.
pub struct RefinementService {
    provider: Arc<dyn CompletionProvider>,
    model_configs: Arc<dyn ModelConfigRepository>,
    formats: Arc<dyn PlatformFormatRepository>,
}

impl RefinementService {
    /// Creates a new RefinementService.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        model_configs: Arc<dyn ModelConfigRepository>,
        formats: Arc<dyn PlatformFormatRepository>,
    ) -> Self {
        Self {
            provider,
            model_configs,
            formats,
        }
    }

    /// Runs one refinement round-trip and returns the validated content.
    ///
    /// Refinement always targets one existing record, so exactly one provider
    /// invocation is made. This service never touches persistence; the caller
    /// applies the update after a successful return, which is what guarantees
    /// stored content is untouched on any error path here.
    ///
    /// # Errors
    ///
    /// `RoteiroError::RefinementValidation` when the re-parsed result is
    /// structurally incomplete (empty script, zero score or no analysis
    /// items).
    pub async fn refine(&self, request: &RefinementRequest) -> Result<ParsedContent> {
        let configuration = model_config::resolve_active(self.model_configs.as_ref()).await?;
        let format_hint = self.formats.format_for(&request.platform).await?;
        let messages = prompt::build_refinement_messages(request, &format_hint);

        tracing::info!(
            record_id = %request.target_record_id,
            platform = %request.platform,
            "dispatching refinement"
        );

        let raw = self
            .provider
            .complete(CompletionRequest::new(&configuration, messages))
            .await
            .map_err(|err| RoteiroError::provider(&request.platform, err.to_string()))?;

        let content = ParsedContent::from_raw(&raw);
        validate_refined(&content)?;
        Ok(content)
    }
}

/// The validation gate between parsing and acceptance.
///
/// Each sentinel that is tolerable on first-time generation is fatal here.
fn validate_refined(content: &ParsedContent) -> Result<()> {
    if content.script_body.trim().is_empty() {
        return Err(RoteiroError::refinement_validation(
            "refined script body is empty",
        ));
    }
    if content.aggregate_score == 0 {
        return Err(RoteiroError::refinement_validation(
            "refined viral score is missing",
        ));
    }
    if content.analysis_items.is_empty() {
        return Err(RoteiroError::refinement_validation(
            "refined content has no analysis items",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roteiro_core::content::AnalysisItem;

    fn complete_content() -> ParsedContent {
        ParsedContent {
            script_body: "Hook: acorde cedo.".to_string(),
            analysis_items: vec![AnalysisItem {
                title: "Gancho".to_string(),
                score: 8,
                description: "bom".to_string(),
            }],
            aggregate_score: 70,
        }
    }

    #[test]
    fn test_gate_accepts_complete_content() {
        assert!(validate_refined(&complete_content()).is_ok());
    }

    #[test]
    fn test_gate_rejects_empty_script() {
        let content = ParsedContent {
            script_body: "   ".to_string(),
            ..complete_content()
        };

        let err = validate_refined(&content).unwrap_err();
        assert!(err.is_refinement_validation());
    }

    #[test]
    fn test_gate_rejects_zero_score() {
        let content = ParsedContent {
            aggregate_score: 0,
            ..complete_content()
        };

        assert!(validate_refined(&content).unwrap_err().is_refinement_validation());
    }

    #[test]
    fn test_gate_rejects_missing_analysis_items() {
        let content = ParsedContent {
            analysis_items: vec![],
            ..complete_content()
        };

        assert!(validate_refined(&content).unwrap_err().is_refinement_validation());
    }
}
