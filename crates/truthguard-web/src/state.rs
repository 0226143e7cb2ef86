//! Application state.

use std::sync::Arc;
use truthguard_core::{Analyzer, ContentAnalyzer};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn ContentAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}
