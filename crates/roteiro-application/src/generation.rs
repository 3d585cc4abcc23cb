//! Generation batch service.
//!
//! One user action fans out into one provider invocation per requested
//! platform. The batch is all-or-nothing: any platform's failure aborts the
//! whole batch, tagged with the platform that failed.

use crate::prompt;
use futures::future;
use roteiro_core::content::{GenerationRequest, ParsedContent, PlatformFormatRepository};
use roteiro_core::error::{Result, RoteiroError};
use roteiro_core::model_config::{self, ModelConfigRepository, ModelConfiguration};
use roteiro_interaction::{CompletionProvider, CompletionRequest};
use std::sync::Arc;

/// One platform's share of a generation batch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformContent {
    /// Platform this content was generated for
    pub platform: String,
    /// Structured content parsed from the raw completion
    pub content: ParsedContent,
}

/// Service running generation batches against an injected provider.
pub struct GenerationService {
    provider: Arc<dyn CompletionProvider>,
    model_configs: Arc<dyn ModelConfigRepository>,
    formats: Arc<dyn PlatformFormatRepository>,
}

impl GenerationService {
    /// Creates a new GenerationService.
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

    /// Runs one generation batch.
    ///
    /// Resolves the active model configuration first (hard stop when absent
    /// or incomplete - no provider call is made), then invokes every platform
    /// concurrently.
    ///
    /// Results come back in request order: the Nth element always belongs to
    /// the Nth requested platform, regardless of completion order.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<PlatformContent>> {
        let configuration = model_config::resolve_active(self.model_configs.as_ref()).await?;

        tracing::info!(
            topic = %request.topic,
            platforms = request.platforms.len(),
            model = %configuration.model_name,
            "dispatching generation batch"
        );

        let invocations = request
            .platforms
            .iter()
            .map(|platform| self.generate_for_platform(&configuration, request, platform));

        // try_join_all preserves input order and fails the whole batch on the
        // first per-platform error.
        future::try_join_all(invocations).await
    }

    async fn generate_for_platform(
        &self,
        configuration: &ModelConfiguration,
        request: &GenerationRequest,
        platform: &str,
    ) -> Result<PlatformContent> {
        let format_hint = self.formats.format_for(platform).await?;
        let messages = prompt::build_generation_messages(
            &request.topic,
            platform,
            &format_hint,
            request.context_sample.as_ref(),
        );

        let raw = self
            .provider
            .complete(CompletionRequest::new(configuration, messages))
            .await
            .map_err(|err| RoteiroError::provider(platform, err.to_string()))?;

        let content = ParsedContent::from_raw(&raw);
        if content.is_parse_failure() {
            tracing::warn!(platform, "completion carried no recognizable structure");
        }

        Ok(PlatformContent {
            platform: platform.to_string(),
            content,
        })
    }
}
