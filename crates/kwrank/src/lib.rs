//! Keyword analysis for job postings.
//!
//! Takes keyword candidates extracted from a posting (usually by an LLM
//! pass), scores them against the posting text, separates hard knockout
//! requirements from skills, clusters near-duplicate phrasings under a
//! canonical alias, and optionally locates the best sentences in an existing
//! resume to work each keyword into.
//!
//! ```no_run
//! use kwrank::{analyze, Config, Posting};
//!
//! # fn main() -> Result<(), kwrank::AnalysisError> {
//! let posting = Posting::from_path("posting.md")?;
//! let candidates = kwrank::loader::candidates_from_path("keywords.json")?;
//! let analysis = analyze(candidates, &posting, None, &Config::default())?;
//! for cluster in &analysis.clusters {
//!     println!("{:12} {}", cluster.category.as_str(), cluster.alias);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod errors;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod report;

pub use analysis::injection::{ResumeContent, ResumeSentence};
pub use analysis::similarity::{Similarity, TokenSimilarity};
pub use config::Config;
pub use errors::AnalysisError;
pub use loader::{candidates_from_json, candidates_from_path, Posting};
pub use models::analysis::{
    Analysis, AnalysisCounts, Cluster, InjectionAction, InjectionMatch, InjectionOutcome,
};
pub use models::candidate::{
    Category, ClassifiedCandidate, KeywordCandidate, KnockoutKind, Provenance, Role,
};
pub use pipeline::{analyze, analyze_with_similarity};
pub use report::{analysis_document, render_checklist, save_analysis, save_checklist};
