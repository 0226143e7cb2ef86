//! Client-side submission flow: validate, upload, invoke, record.

pub mod client;
pub mod image;
pub mod state;

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::analysis::model::{AnalysisRequest, AnalysisResult};
use crate::analysis::ContentAnalyzer;
use crate::error::TruthguardResult;
use crate::storage::{object_name, ObjectStore};

pub use client::EndpointClient;
pub use image::{validate_image, ImageFile, MAX_IMAGE_BYTES};
pub use state::{PendingSubmission, SubmissionInput, SubmissionState};

/// Uploads a pending submission's image and asks the analyzer for a verdict.
#[derive(Clone)]
pub struct Submitter {
    analyzer: Arc<dyn ContentAnalyzer>,
    store: Option<Arc<dyn ObjectStore>>,
}

impl Submitter {
    pub fn new(analyzer: Arc<dyn ContentAnalyzer>) -> Self {
        Self {
            analyzer,
            store: None,
        }
    }

    /// Upload images to `store` instead of inlining them as data URLs.
    pub fn with_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn submit(&self, pending: PendingSubmission) -> TruthguardResult<AnalysisResult> {
        let image_url = match &pending.image {
            Some(image) => Some(self.image_reference(image).await?),
            None => None,
        };

        let request = AnalysisRequest::new(pending.text, image_url);
        self.analyzer.analyze(&request).await
    }

    /// Run a submission against `state`, recording the outcome.
    ///
    /// Returns without a network call if the state refuses to begin; a
    /// rejected input is left in the state as its notification.
    pub async fn run(&self, state: &mut SubmissionState) -> TruthguardResult<()> {
        let pending = state.begin()?;
        let outcome = self.submit(pending).await;
        state.complete(outcome);
        Ok(())
    }

    async fn image_reference(&self, image: &ImageFile) -> TruthguardResult<String> {
        match &self.store {
            Some(store) => {
                let name = object_name(&image.name, Utc::now());
                store
                    .upload(&name, image.bytes.clone(), &image.content_type)
                    .await?;
                let url = store.public_url(&name);
                info!(name = %name, url = %url, "Image uploaded for analysis");
                Ok(url)
            }
            None => {
                debug!(size = image.size(), "No object store configured, inlining image");
                Ok(image.data_url())
            }
        }
    }
}
