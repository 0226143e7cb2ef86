//! Content analysis: prompt construction, completion and reply parsing.

pub mod model;
pub mod prompt;
pub mod reply;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{TruthguardError, TruthguardResult};
use crate::gateway::{CompletionClient, CompletionRequest};

use model::{AnalysisRequest, AnalysisResult};
use reply::ReplyStrategy;

/// Anything that can classify an [`AnalysisRequest`].
///
/// Implemented in-process by [`Analyzer`] and over HTTP by
/// [`crate::submission::client::EndpointClient`].
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> TruthguardResult<AnalysisResult>;
}

/// Stateless request handler behind the analysis endpoint.
#[derive(Clone)]
pub struct Analyzer {
    completions: Arc<dyn CompletionClient>,
}

impl Analyzer {
    pub fn new(completions: Arc<dyn CompletionClient>) -> Self {
        Self { completions }
    }
}

#[async_trait]
impl ContentAnalyzer for Analyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> TruthguardResult<AnalysisResult> {
        info!(
            has_text = request.usable_text().is_some(),
            has_image = request.usable_image_url().is_some(),
            "Analyzing content"
        );

        let content = prompt::build_user_content(request).ok_or(TruthguardError::NoContent)?;
        let completion = CompletionRequest {
            system: prompt::SYSTEM_PROMPT.to_string(),
            content,
        };

        let reply = self.completions.complete(&completion).await?;
        debug!(chars = reply.len(), "Completion reply received");

        let parsed = reply::parse_reply(&reply);
        if parsed.strategy == ReplyStrategy::Heuristic {
            warn!("Failed to parse AI response as JSON, using heuristic fallback");
        }

        info!(
            strategy = %parsed.strategy,
            result = %parsed.result.result,
            confidence = parsed.result.confidence,
            "Analysis complete"
        );
        Ok(parsed.result)
    }
}
