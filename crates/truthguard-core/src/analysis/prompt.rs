//! Classification prompts.

use crate::gateway::ContentPart;

use super::model::AnalysisRequest;

/// System role sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are an expert fake news detector with expertise in identifying misinformation, manipulated images, and misleading content. Provide accurate, balanced analysis.";

/// Reply shape the model is asked to produce.
pub const RESPONSE_FORMAT: &str = r#"Respond in JSON format with: {"result": "fake" or "real", "confidence": 0-100, "keywords": ["keyword1", "keyword2"], "explanation": "brief explanation"}"#;

/// Prompt for text submissions. `{text}` is replaced with the submitted text.
pub const TEXT_PROMPT: &str = r#"Analyze this text and determine if it's likely to be fake news or real news. Consider:
- Sensationalist language
- Verifiable facts vs claims
- Emotional manipulation
- Source credibility indicators

Text to analyze: "{text}"

"#;

/// Prompt for image-only submissions.
pub const IMAGE_PROMPT: &str = r#"Analyze this image and determine if it's likely to be manipulated, fake, or authentic. Consider:
- Signs of digital manipulation
- Inconsistencies in lighting or shadows
- Unnatural elements
- Context clues

"#;

/// Appended to the text prompt when an image accompanies the text.
pub const CROSS_CHECK_SUFFIX: &str = "\n\nAlso analyze the provided image for any signs of manipulation or inconsistencies that might support or contradict the text.";

/// Build the user message for a request.
///
/// Returns `None` when the request carries neither usable text nor an image.
pub fn build_user_content(request: &AnalysisRequest) -> Option<Vec<ContentPart>> {
    let text = request.usable_text();
    let image_url = request.usable_image_url();

    let mut parts = Vec::with_capacity(2);
    match (text, image_url) {
        (None, None) => return None,
        (Some(text), None) => parts.push(ContentPart::text(text_prompt(text))),
        (None, Some(_)) => {
            parts.push(ContentPart::text(format!("{}{}", IMAGE_PROMPT, RESPONSE_FORMAT)))
        }
        (Some(text), Some(_)) => parts.push(ContentPart::text(format!(
            "{}{}",
            text_prompt(text),
            CROSS_CHECK_SUFFIX
        ))),
    }

    if let Some(url) = image_url {
        parts.push(ContentPart::image_url(url));
    }

    Some(parts)
}

fn text_prompt(text: &str) -> String {
    format!("{}{}", TEXT_PROMPT.replace("{text}", text), RESPONSE_FORMAT)
}
