// Analysis stages, in pipeline order: scoring, knockout categorization,
// clustering, then the optional resume injection scan. Experience extraction
// is a pre-stage over the posting itself. Each stage compiles its patterns
// once at construction and is pure afterwards.

pub mod clustering;
pub mod experience;
pub mod injection;
pub mod knockout;
pub mod scoring;
pub mod similarity;

// Re-export the stage entry points consumed by the pipeline and by callers.
pub use clustering::Clusterer;
pub use experience::{ExperienceExtractor, ExperienceRequirement};
pub use injection::{InjectionScanner, ResumeContent, ResumeSentence};
pub use knockout::Categorizer;
pub use scoring::Scorer;
pub use similarity::{Similarity, TokenSimilarity};
