//! Shared wiring for commands.

use anyhow::Result;
use roteiro_application::ContentUsecase;
use roteiro_infrastructure::{
    JsonDirPromptRepository, TomlModelConfigRepository, TomlPlatformFormatRepository,
};
use roteiro_interaction::OpenAiClient;
use std::sync::Arc;

/// Builds the content use case against the default file locations and the
/// OpenAI provider configured via secret.json or environment.
pub async fn build_usecase() -> Result<ContentUsecase> {
    let provider = Arc::new(OpenAiClient::try_from_env()?);
    let model_configs = Arc::new(TomlModelConfigRepository::default_location()?);
    let formats = Arc::new(TomlPlatformFormatRepository::default_location()?);
    let prompts = Arc::new(JsonDirPromptRepository::default_location().await?);

    Ok(ContentUsecase::new(provider, model_configs, formats, prompts))
}
