//! Parsing of free-text model replies into an [`AnalysisResult`].
//!
//! Strategies are tried in order; the first one that yields a well-formed
//! result wins. The heuristic strategy always succeeds, so every reply
//! produces a classification.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::model::{AnalysisResult, Verdict};

/// Confidence reported by the heuristic fallback.
pub const HEURISTIC_CONFIDENCE: u8 = 75;

/// Keyword reported by the heuristic fallback.
pub const HEURISTIC_KEYWORD: &str = "AI analysis";

/// Maximum characters of the raw reply kept as the fallback explanation.
pub const HEURISTIC_EXPLANATION_CHARS: usize = 200;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("fenced JSON pattern is valid")
});

static BRACE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\{[\s\S]*\})").expect("brace span pattern is valid"));

/// A way of turning a reply into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStrategy {
    /// JSON object inside a ```` ``` ```` / ```` ```json ```` fence.
    FencedBlock,
    /// First `{` through last `}` of the reply.
    BraceSpan,
    /// The whole reply as JSON.
    RawJson,
    /// Keyword match on the prose.
    Heuristic,
}

impl ReplyStrategy {
    /// Structured strategies, in the order they are attempted.
    pub const STRUCTURED: [ReplyStrategy; 3] = [
        ReplyStrategy::FencedBlock,
        ReplyStrategy::BraceSpan,
        ReplyStrategy::RawJson,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReplyStrategy::FencedBlock => "fenced_block",
            ReplyStrategy::BraceSpan => "brace_span",
            ReplyStrategy::RawJson => "raw_json",
            ReplyStrategy::Heuristic => "heuristic",
        }
    }

    fn attempt(&self, reply: &str) -> Option<AnalysisResult> {
        match self {
            ReplyStrategy::FencedBlock => capture(&FENCED_JSON, reply).and_then(parse_json),
            ReplyStrategy::BraceSpan => capture(&BRACE_SPAN, reply).and_then(parse_json),
            ReplyStrategy::RawJson => parse_json(reply),
            ReplyStrategy::Heuristic => Some(heuristic(reply)),
        }
    }
}

impl fmt::Display for ReplyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed reply tagged with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub strategy: ReplyStrategy,
    pub result: AnalysisResult,
}

/// Parse a model reply.
pub fn parse_reply(reply: &str) -> ParsedReply {
    ReplyStrategy::STRUCTURED
        .iter()
        .find_map(|strategy| {
            strategy.attempt(reply).map(|result| ParsedReply {
                strategy: *strategy,
                result,
            })
        })
        .unwrap_or_else(|| ParsedReply {
            strategy: ReplyStrategy::Heuristic,
            result: heuristic(reply),
        })
}

fn capture<'a>(pattern: &Regex, reply: &'a str) -> Option<&'a str> {
    pattern
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_json(candidate: &str) -> Option<AnalysisResult> {
    serde_json::from_str(candidate.trim()).ok()
}

/// Coarse classification of prose the model returned instead of JSON.
pub fn heuristic(reply: &str) -> AnalysisResult {
    let result = if reply.to_lowercase().contains("fake") {
        Verdict::Fake
    } else {
        Verdict::Real
    };

    AnalysisResult {
        result,
        confidence: HEURISTIC_CONFIDENCE,
        keywords: vec![HEURISTIC_KEYWORD.to_string()],
        explanation: reply.chars().take(HEURISTIC_EXPLANATION_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"result": "fake", "confidence": 92, "keywords": ["sensationalism", "no sources"], "explanation": "Extraordinary claim without evidence."}"#;

    fn expected() -> AnalysisResult {
        AnalysisResult {
            result: Verdict::Fake,
            confidence: 92,
            keywords: vec!["sensationalism".to_string(), "no sources".to_string()],
            explanation: "Extraordinary claim without evidence.".to_string(),
        }
    }

    #[test]
    fn test_fenced_json_block() {
        let reply = format!("Here is my analysis:\n```json\n{}\n```\nHope this helps.", BODY);
        let parsed = parse_reply(&reply);
        assert_eq!(parsed.strategy, ReplyStrategy::FencedBlock);
        assert_eq!(parsed.result, expected());
    }

    #[test]
    fn test_untagged_fence() {
        let reply = format!("```\n{}\n```", BODY);
        assert_eq!(parse_reply(&reply).strategy, ReplyStrategy::FencedBlock);
    }

    #[test]
    fn test_brace_span_in_prose() {
        let reply = format!("Sure! {} Let me know if you need more.", BODY);
        let parsed = parse_reply(&reply);
        assert_eq!(parsed.strategy, ReplyStrategy::BraceSpan);
        assert_eq!(parsed.result, expected());
    }

    #[test]
    fn test_brace_span_after_broken_fence() {
        // The fence closes on a non-object, so only the brace span parses.
        let reply = format!("```json\nnot json\n```\n{}", BODY);
        assert_eq!(parse_reply(&reply).strategy, ReplyStrategy::BraceSpan);
    }

    #[test]
    fn test_raw_json_passes_through() {
        let parsed = parse_reply(BODY);
        // The brace span covers the whole body, so it is found first.
        assert_eq!(parsed.strategy, ReplyStrategy::BraceSpan);
        assert_eq!(parsed.result, expected());
        assert_eq!(
            serde_json::to_value(&parsed.result).unwrap(),
            serde_json::from_str::<serde_json::Value>(BODY).unwrap()
        );
    }

    #[test]
    fn test_raw_json_strategy_directly() {
        assert_eq!(ReplyStrategy::RawJson.attempt(BODY), Some(expected()));
        assert_eq!(ReplyStrategy::RawJson.attempt("no json"), None);
    }

    #[test]
    fn test_heuristic_detects_fake() {
        let reply = "This article appears to be FAKE news designed to mislead readers.";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.strategy, ReplyStrategy::Heuristic);
        assert_eq!(parsed.result.result, Verdict::Fake);
        assert_eq!(parsed.result.confidence, 75);
        assert_eq!(parsed.result.keywords, vec!["AI analysis".to_string()]);
        assert_eq!(parsed.result.explanation, reply);
    }

    #[test]
    fn test_heuristic_defaults_to_real() {
        let parsed = parse_reply("The report is consistent with official statements.");
        assert_eq!(parsed.strategy, ReplyStrategy::Heuristic);
        assert_eq!(parsed.result.result, Verdict::Real);
    }

    #[test]
    fn test_heuristic_on_wrong_shape_json() {
        let reply = r#"{"verdict": "fake", "score": 0.9}"#;
        let parsed = parse_reply(reply);
        assert_eq!(parsed.strategy, ReplyStrategy::Heuristic);
        assert_eq!(parsed.result.result, Verdict::Fake);
    }

    #[test]
    fn test_null_explanation_keeps_model_verdict() {
        let reply = r#"{"result": "real", "confidence": 95, "keywords": ["wire report"], "explanation": null, "note": "not fake"}"#;
        let parsed = parse_reply(reply);
        assert_eq!(parsed.strategy, ReplyStrategy::BraceSpan);
        assert_eq!(parsed.result.result, Verdict::Real);
        assert_eq!(parsed.result.confidence, 95);
        assert_eq!(parsed.result.keywords, vec!["wire report".to_string()]);
        assert_eq!(parsed.result.explanation, "");
    }

    #[test]
    fn test_null_keywords_keeps_model_verdict() {
        let reply = "```json\n{\"result\": \"real\", \"confidence\": 92, \"keywords\": null, \"explanation\": \"Not fake.\"}\n```";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.strategy, ReplyStrategy::FencedBlock);
        assert_eq!(parsed.result.result, Verdict::Real);
        assert_eq!(parsed.result.confidence, 92);
        assert!(parsed.result.keywords.is_empty());
        assert_eq!(parsed.result.explanation, "Not fake.");
    }

    #[test]
    fn test_string_confidence_keeps_model_verdict() {
        let reply = r#"{"result": "Real", "confidence": "92", "keywords": [], "explanation": "fake-looking font, real source"}"#;
        let parsed = parse_reply(reply);
        assert_ne!(parsed.strategy, ReplyStrategy::Heuristic);
        assert_eq!(parsed.result.result, Verdict::Real);
        assert_eq!(parsed.result.confidence, 92);
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let reply = r#"{"result": "fake", "confidence": 81, "keywords": ["doctored"], "explanation": "Cloned region.", "sources": ["https://example.org"]}"#;
        let parsed = parse_reply(reply);
        assert_eq!(parsed.strategy, ReplyStrategy::BraceSpan);
        assert_eq!(
            serde_json::to_value(&parsed.result).unwrap(),
            serde_json::json!({
                "result": "fake",
                "confidence": 81,
                "keywords": ["doctored"],
                "explanation": "Cloned region."
            })
        );
    }

    #[test]
    fn test_non_numeric_confidence_falls_back() {
        let reply = r#"{"result": "real", "confidence": "very high"}"#;
        assert_eq!(parse_reply(reply).strategy, ReplyStrategy::Heuristic);
    }

    #[test]
    fn test_heuristic_truncates_explanation_by_chars() {
        let reply = "é".repeat(250);
        let parsed = parse_reply(&reply);
        assert_eq!(parsed.result.explanation.chars().count(), 200);
        assert_eq!(parse_reply("").result.explanation, "");
    }
}
