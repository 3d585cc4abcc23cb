//! Content generation domain: models, parsing, persistence boundaries.

pub mod model;
pub mod parser;
pub mod repository;

pub use model::{
    AnalysisItem, ContextSample, GenerationRequest, ParsedContent, RefinementRequest, StoredPrompt,
};
pub use repository::{PlatformFormatRepository, PromptRepository};
