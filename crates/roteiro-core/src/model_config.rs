//! Active model configuration resolution.
//!
//! Generation parameters live in an external configuration store as a single
//! row marked "active". Resolution is all-or-nothing: a missing row, an
//! undecodable settings object, or any missing numeric setting aborts the
//! batch before a single provider call is made. Silently defaulting any of
//! these would produce inconsistent, hard-to-reproduce completions.

use crate::error::{Result, RoteiroError};
use serde::{Deserialize, Serialize};

/// The raw "active" row as the configuration store hands it over.
///
/// `settings` may arrive as a native object or as a JSON-encoded string;
/// both are accepted (see [`ModelConfiguration::resolve`]).
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ActiveModelRow {
    /// Provider model identifier (e.g. "gpt-4o")
    pub model_name: String,
    /// Nested generation settings, native or JSON-encoded
    pub settings: serde_json::Value,
}

/// Decoded settings with every field still optional.
///
/// This is the decode target only; [`ModelConfiguration`] is the validated
/// form the rest of the pipeline consumes.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct GenerationSettings {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

/// Fully validated model configuration for one generation batch.
///
/// Resolved once per batch and shared read-only across the per-platform
/// fan-out. Callers should not cache it globally: the active row can change
/// between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfiguration {
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl ModelConfiguration {
    /// Validates an active row into a usable configuration.
    ///
    /// # Errors
    ///
    /// `RoteiroError::Config` when the settings object fails to decode or
    /// when any of the five numeric settings is missing or zero-equivalent.
    pub fn resolve(row: ActiveModelRow) -> Result<Self> {
        let settings = decode_settings(&row.settings)?;

        Ok(Self {
            model_name: row.model_name,
            temperature: required_f32("temperature", settings.temperature)?,
            max_tokens: required_u32("max_tokens", settings.max_tokens)?,
            top_p: required_f32("top_p", settings.top_p)?,
            frequency_penalty: required_f32("frequency_penalty", settings.frequency_penalty)?,
            presence_penalty: required_f32("presence_penalty", settings.presence_penalty)?,
        })
    }
}

fn decode_settings(value: &serde_json::Value) -> Result<GenerationSettings> {
    let native = match value {
        // JSON-encoded settings string
        serde_json::Value::String(encoded) => serde_json::from_str(encoded).map_err(|err| {
            RoteiroError::config(format!("model settings failed to decode: {err}"))
        })?,
        other => other.clone(),
    };

    serde_json::from_value(native)
        .map_err(|err| RoteiroError::config(format!("model settings failed to decode: {err}")))
}

fn required_f32(name: &str, value: Option<f32>) -> Result<f32> {
    match value {
        Some(v) if v != 0.0 => Ok(v),
        Some(_) => Err(RoteiroError::config(format!(
            "model setting '{name}' must be non-zero"
        ))),
        None => Err(RoteiroError::config(format!(
            "model setting '{name}' is missing"
        ))),
    }
}

fn required_u32(name: &str, value: Option<u32>) -> Result<u32> {
    match value {
        Some(v) if v != 0 => Ok(v),
        Some(_) => Err(RoteiroError::config(format!(
            "model setting '{name}' must be non-zero"
        ))),
        None => Err(RoteiroError::config(format!(
            "model setting '{name}' is missing"
        ))),
    }
}

/// Read boundary to the configuration store.
///
/// The pipeline only ever reads; writes belong to whatever administers the
/// store.
#[async_trait::async_trait]
pub trait ModelConfigRepository: Send + Sync {
    /// Returns the single row currently marked active, if any.
    async fn find_active(&self) -> Result<Option<ActiveModelRow>>;
}

/// Resolves the active configuration, failing fast when none exists.
pub async fn resolve_active(repository: &dyn ModelConfigRepository) -> Result<ModelConfiguration> {
    let row = repository
        .find_active()
        .await?
        .ok_or_else(|| RoteiroError::config("no active model configuration"))?;

    ModelConfiguration::resolve(row)
}
