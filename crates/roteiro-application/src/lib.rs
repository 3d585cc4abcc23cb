pub mod generation;
pub mod prompt;
pub mod refinement;
pub mod usecase;

pub use generation::{GenerationService, PlatformContent};
pub use refinement::RefinementService;
pub use usecase::{ContentUsecase, GenerationOutcome};
