//! TruthGuard Core Library
//!
//! Domain models and collaborators for content verification: prompt
//! construction, the completion gateway, reply parsing, object storage
//! and the client-side submission flow.

pub mod analysis;
pub mod error;
pub mod gateway;
pub mod render;
pub mod storage;
pub mod submission;

#[cfg(test)]
pub(crate) mod testing;

pub use analysis::model::{AnalysisRequest, AnalysisResult, Verdict};
pub use analysis::{Analyzer, ContentAnalyzer};
pub use error::{TruthguardError, TruthguardResult};
