//! Presentation of an analysis result.

use crate::analysis::model::{AnalysisResult, Verdict};

/// Colour family for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
}

/// Display-ready view of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView<'a> {
    pub headline: &'static str,
    pub tone: Tone,
    pub icon: &'static str,
    pub confidence: u8,
    /// Present only when non-empty.
    pub explanation: Option<&'a str>,
    /// Present only when non-empty.
    pub keywords: Option<&'a [String]>,
}

impl<'a> From<&'a AnalysisResult> for ResultView<'a> {
    fn from(result: &'a AnalysisResult) -> Self {
        let (headline, tone, icon) = match result.result {
            Verdict::Real => ("Likely Real", Tone::Success, "✓"),
            Verdict::Fake => ("Likely Fake", Tone::Danger, "✗"),
        };

        Self {
            headline,
            tone,
            icon,
            confidence: result.confidence,
            explanation: Some(result.explanation.as_str()).filter(|e| !e.is_empty()),
            keywords: Some(result.keywords.as_slice()).filter(|k| !k.is_empty()),
        }
    }
}

impl ResultView<'_> {
    pub fn confidence_label(&self) -> String {
        format!("Confidence Score: {}%", self.confidence)
    }
}

/// Horizontal progress bar `width` cells wide.
pub fn progress_bar(confidence: u8, width: usize) -> String {
    let filled = (usize::from(confidence.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
