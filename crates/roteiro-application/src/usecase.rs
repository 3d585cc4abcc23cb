//! Content use case: pipeline services wired to persistence.
//!
//! `ContentUsecase` is the one place that touches `PromptRepository`. The
//! generation and refinement services stay persistence-free, which keeps the
//! ordering guarantee explicit: stored content is written only after a batch
//! completes, and only after the refinement gate passes.

use crate::generation::{GenerationService, PlatformContent};
use crate::refinement::RefinementService;
use roteiro_core::content::{
    GenerationRequest, ParsedContent, PlatformFormatRepository, PromptRepository,
    RefinementRequest, StoredPrompt,
};
use roteiro_core::error::{Result, RoteiroError};
use roteiro_core::model_config::ModelConfigRepository;
use roteiro_interaction::CompletionProvider;
use std::sync::Arc;

/// Result of a stored generation batch.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Identifier of the persisted record
    pub record_id: String,
    /// Per-platform parsed content, in request order
    pub results: Vec<PlatformContent>,
}

/// Use case coordinating generation, refinement and persistence.
pub struct ContentUsecase {
    generation: GenerationService,
    refinement: RefinementService,
    prompts: Arc<dyn PromptRepository>,
}

impl ContentUsecase {
    /// Creates a new `ContentUsecase` instance.
    ///
    /// # Arguments
    ///
    /// * `provider` - Injected completion provider
    /// * `model_configs` - Read boundary to the model configuration store
    /// * `formats` - Per-platform format template lookup
    /// * `prompts` - Persistence collaborator for stored records
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        model_configs: Arc<dyn ModelConfigRepository>,
        formats: Arc<dyn PlatformFormatRepository>,
        prompts: Arc<dyn PromptRepository>,
    ) -> Self {
        Self {
            generation: GenerationService::new(
                provider.clone(),
                model_configs.clone(),
                formats.clone(),
            ),
            refinement: RefinementService::new(provider, model_configs, formats),
            prompts,
        }
    }

    /// Runs a generation batch and persists one record combining the
    /// request's topic with the first platform's parsed content.
    pub async fn generate_and_store(&self, request: GenerationRequest) -> Result<GenerationOutcome> {
        request.validate()?;

        let results = self.generation.generate(&request).await?;
        let first = results
            .first()
            .ok_or_else(|| RoteiroError::internal("generation batch returned no results"))?;

        let stored = StoredPrompt::new(
            request.topic.as_str(),
            first.platform.as_str(),
            first.content.clone(),
            request.requester_id.as_str(),
        );
        self.prompts.create(&stored).await?;

        tracing::info!(record_id = %stored.id, "generation batch stored");

        Ok(GenerationOutcome {
            record_id: stored.id,
            results,
        })
    }

    /// Refines an existing record and persists the accepted result.
    ///
    /// The update call runs strictly after the refinement gate passes, so a
    /// rejected refinement provably never overwrites stored content.
    pub async fn refine_and_store(&self, request: RefinementRequest) -> Result<ParsedContent> {
        let content = self.refinement.refine(&request).await?;
        self.prompts
            .update_content(&request.target_record_id, &content)
            .await?;

        tracing::info!(record_id = %request.target_record_id, "refinement stored");
        Ok(content)
    }

    /// Convenience for callers that only hold a record id: loads the stored
    /// record, builds the refinement request from it and delegates to
    /// [`Self::refine_and_store`].
    pub async fn refine_record(&self, record_id: &str, instruction: &str) -> Result<ParsedContent> {
        let stored = self
            .prompts
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| RoteiroError::not_found("prompt", record_id))?;

        let request = RefinementRequest {
            original_topic: stored.topic,
            platform: stored.platform,
            current_script_body: stored.content.script_body,
            instruction: instruction.to_string(),
            target_record_id: record_id.to_string(),
        };

        self.refine_and_store(request).await
    }
}
