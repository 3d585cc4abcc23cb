use anyhow::{Context, Result};
use roteiro_core::model_config::resolve_active;
use roteiro_infrastructure::TomlModelConfigRepository;

pub async fn show() -> Result<()> {
    let repository = TomlModelConfigRepository::default_location()?;
    let configuration = resolve_active(&repository)
        .await
        .context("no usable model configuration")?;

    println!("model: {}", configuration.model_name);
    println!("temperature: {}", configuration.temperature);
    println!("max_tokens: {}", configuration.max_tokens);
    println!("top_p: {}", configuration.top_p);
    println!("frequency_penalty: {}", configuration.frequency_penalty);
    println!("presence_penalty: {}", configuration.presence_penalty);

    Ok(())
}
