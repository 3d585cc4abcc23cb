//! Content domain models.
//!
//! Covers the lifecycle of a generated script: the request that triggers a
//! generation batch, the structured content parsed out of the provider's raw
//! completion, and the persisted record combining both.

use crate::error::{Result, RoteiroError};
use serde::{Deserialize, Serialize};

/// Previously generated content supplied back into a new generation request
/// as a steering example.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ContextSample {
    /// Title of the sample content
    pub title: String,
    /// Full script body of the sample
    pub body: String,
    /// Viral score the sample achieved (0-100)
    pub aggregate_score: u32,
}

/// A request for one generation batch.
///
/// Created per user action, consumed on dispatch. Duplicated platforms are
/// allowed but wasteful (each one costs a provider invocation).
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GenerationRequest {
    /// Topic the script should cover
    pub topic: String,
    /// Target platforms, in the order results will be returned
    pub platforms: Vec<String>,
    /// Opaque identity of the requesting user
    pub requester_id: String,
    /// Optional steering example from earlier output
    #[serde(default)]
    pub context_sample: Option<ContextSample>,
}

impl GenerationRequest {
    /// Rejects requests that must never reach the prompt builder.
    ///
    /// The builders themselves do no validation, so the gate lives here,
    /// upstream of any configuration read or provider call.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(RoteiroError::invalid_request("topic must not be empty"));
        }
        if self.platforms.is_empty() {
            return Err(RoteiroError::invalid_request(
                "at least one platform is required",
            ));
        }
        Ok(())
    }
}

/// One named, scored, described dimension of content quality.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisItem {
    /// Dimension name (e.g. "Gancho")
    pub title: String,
    /// Score out of 10
    pub score: u8,
    /// Free-text assessment
    pub description: String,
}

/// Structured content derived deterministically from one raw completion.
///
/// An empty `script_body`, empty `analysis_items` and an `aggregate_score`
/// of 0 are parse-failure sentinels, not valid zero-content results. Callers
/// decide whether sentinels are acceptable (first-time generation) or must be
/// rejected (refinement).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedContent {
    /// Cleaned script body; empty when no end marker was found
    pub script_body: String,
    /// Scored analysis dimensions, in source order
    #[serde(default)]
    pub analysis_items: Vec<AnalysisItem>,
    /// Viral score 0-100; 0 doubles as the "unparseable" sentinel
    #[serde(default)]
    pub aggregate_score: u32,
}

impl ParsedContent {
    /// Extracts all three sections from a raw completion.
    ///
    /// Never fails: each extractor degrades to its empty/zero sentinel.
    pub fn from_raw(raw: &str) -> Self {
        Self {
            script_body: super::parser::extract_script(raw),
            analysis_items: super::parser::extract_analysis_items(raw),
            aggregate_score: super::parser::extract_aggregate_score(raw),
        }
    }

    /// True when every extractor degraded to its sentinel, i.e. the raw
    /// completion carried no recognizable structure at all.
    pub fn is_parse_failure(&self) -> bool {
        self.script_body.trim().is_empty()
            && self.analysis_items.is_empty()
            && self.aggregate_score == 0
    }
}

/// A targeted, single-section edit applied to already-generated content.
///
/// Created per refinement chat turn, consumed immediately, not retained
/// beyond the single round-trip.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RefinementRequest {
    /// Topic the original content was generated for
    pub original_topic: String,
    /// Platform the original content targets
    pub platform: String,
    /// Script body as currently stored
    pub current_script_body: String,
    /// Natural-language edit request from the user
    pub instruction: String,
    /// Identifier of the stored record this refinement targets
    pub target_record_id: String,
}

/// Persisted record combining a generation request's topic/platform with the
/// first platform's parsed content.
///
/// The pipeline only produces this value; storage is owned by the
/// persistence collaborator behind `PromptRepository`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StoredPrompt {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Topic the content was generated for
    pub topic: String,
    /// Platform of the stored content
    pub platform: String,
    /// Parsed structured content
    pub content: ParsedContent,
    /// Opaque identity of the requesting user
    pub requester_id: String,
    /// RFC3339 creation timestamp
    pub created_at: String,
    /// RFC3339 timestamp of the last content update
    pub updated_at: String,
}

impl StoredPrompt {
    /// Creates a new record with a fresh UUID and current timestamps.
    pub fn new(
        topic: impl Into<String>,
        platform: impl Into<String>,
        content: ParsedContent,
        requester_id: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic: topic.into(),
            platform: platform.into(),
            content,
            requester_id: requester_id.into(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
