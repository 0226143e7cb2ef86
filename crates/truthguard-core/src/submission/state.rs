//! Client-side submission state.

use crate::analysis::model::AnalysisResult;
use crate::error::{TruthguardError, TruthguardResult};

use super::image::ImageFile;

/// Message shown when neither text nor an image was provided.
pub const INPUT_REQUIRED: &str = "Please enter text or upload an image to analyze.";

/// What the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    pub text: String,
    pub image: Option<ImageFile>,
}

impl SubmissionInput {
    pub fn trimmed_text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_none() && self.image.is_none()
    }
}

/// A submission handed off to the network, detached from the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub text: Option<String>,
    pub image: Option<ImageFile>,
}

/// Current input, in-flight flag and last outcome, updated per action.
#[derive(Debug, Clone, Default)]
pub struct SubmissionState {
    input: SubmissionInput,
    in_flight: bool,
    last_result: Option<AnalysisResult>,
    last_error: Option<String>,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    /// Notification from the most recent failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.text = text.into();
    }

    pub fn select_image(&mut self, image: ImageFile) {
        self.input.image = Some(image);
        self.last_result = None;
    }

    pub fn clear_image(&mut self) {
        self.input.image = None;
        self.last_result = None;
    }

    /// Clear the current notification once it has been shown.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Start a submission.
    ///
    /// Empty input is rejected and recorded as the current notification.
    /// A submission already in flight is refused without touching the state.
    pub fn begin(&mut self) -> TruthguardResult<PendingSubmission> {
        if self.in_flight {
            return Err(TruthguardError::InFlight);
        }
        if self.input.is_empty() {
            self.last_error = Some(INPUT_REQUIRED.to_string());
            return Err(TruthguardError::validation(INPUT_REQUIRED));
        }

        self.in_flight = true;
        self.last_result = None;
        self.last_error = None;

        Ok(PendingSubmission {
            text: self.input.trimmed_text().map(str::to_string),
            image: self.input.image.clone(),
        })
    }

    /// Settle the in-flight submission.
    pub fn complete(&mut self, outcome: TruthguardResult<AnalysisResult>) {
        self.in_flight = false;
        match outcome {
            Ok(result) => self.last_result = Some(result),
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::Verdict;

    fn result() -> AnalysisResult {
        AnalysisResult {
            result: Verdict::Real,
            confidence: 80,
            keywords: vec![],
            explanation: String::new(),
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let mut state = SubmissionState::new();
        state.set_text("   ");
        let err = state.begin().unwrap_err();
        assert_eq!(err.to_string(), INPUT_REQUIRED);
        assert!(!state.is_in_flight());
        assert_eq!(state.last_error(), Some(INPUT_REQUIRED));

        state.dismiss_error();
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_in_flight_refusal_keeps_notification() {
        let mut state = SubmissionState::new();
        state.set_text("claim");
        state.begin().unwrap();
        assert!(matches!(state.begin().unwrap_err(), TruthguardError::InFlight));
        assert!(state.last_error().is_none());
        assert!(state.is_in_flight());
    }

    #[test]
    fn test_begin_trims_text_and_blocks_resubmission() {
        let mut state = SubmissionState::new();
        state.set_text("  breaking news  ");

        let pending = state.begin().unwrap();
        assert_eq!(pending.text.as_deref(), Some("breaking news"));
        assert!(pending.image.is_none());
        assert!(state.is_in_flight());
        assert!(matches!(state.begin().unwrap_err(), TruthguardError::InFlight));

        state.complete(Ok(result()));
        assert!(!state.is_in_flight());
        assert_eq!(state.last_result(), Some(&result()));
    }

    #[test]
    fn test_image_only_submission() {
        let mut state = SubmissionState::new();
        state.select_image(ImageFile::new("a.png", "image/png", vec![1]).unwrap());
        let pending = state.begin().unwrap();
        assert_eq!(pending.text, None);
        assert_eq!(pending.image.unwrap().name, "a.png");
    }

    #[test]
    fn test_failure_keeps_input() {
        let mut state = SubmissionState::new();
        state.set_text("claim");
        state.begin().unwrap();
        state.complete(Err(TruthguardError::RateLimited));

        assert!(!state.is_in_flight());
        assert_eq!(state.input().text, "claim");
        assert_eq!(
            state.last_error(),
            Some("Rate limit exceeded. Please try again later.")
        );
        assert!(state.last_result().is_none());

        state.begin().unwrap();
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_image_change_clears_result() {
        let mut state = SubmissionState::new();
        state.set_text("claim");
        state.begin().unwrap();
        state.complete(Ok(result()));
        assert!(state.last_result().is_some());

        state.select_image(ImageFile::new("b.jpg", "image/jpeg", vec![1]).unwrap());
        assert!(state.last_result().is_none());
        state.clear_image();
        assert!(state.input().image.is_none());
    }
}
