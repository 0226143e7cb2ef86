//! Analysis domain models.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content submitted for verification.
///
/// Serialized with the field names the endpoint speaks on the wire:
/// `{"text": ..., "imageUrl": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl AnalysisRequest {
    pub fn new(text: Option<String>, image_url: Option<String>) -> Self {
        Self { text, image_url }
    }

    /// Text with non-whitespace content, untrimmed.
    pub fn usable_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Image reference, if one was given.
    pub fn usable_image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn has_content(&self) -> bool {
        self.usable_text().is_some() || self.usable_image_url().is_some()
    }
}

/// Classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "real",
            Verdict::Fake => "fake",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("real") {
            Ok(Verdict::Real)
        } else if s.eq_ignore_ascii_case("fake") {
            Ok(Verdict::Fake)
        } else {
            Err(format!("unknown verdict '{}', expected 'real' or 'fake'", s))
        }
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Verdict returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub result: Verdict,
    /// Percentage in `0..=100`.
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfidence {
    Number(f64),
    Text(String),
}

/// Accepts any finite number, or a string holding one, rounded and clamped
/// to a percentage.
fn deserialize_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = match RawConfidence::deserialize(deserializer)? {
        RawConfidence::Number(n) => n,
        RawConfidence::Text(s) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("confidence '{}' is not a number", s)))?,
    };
    if !value.is_finite() {
        return Err(de::Error::custom("confidence must be a finite number"));
    }
    Ok(value.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_names() {
        let req = AnalysisRequest::new(Some("hello".to_string()), None);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({"text": "hello", "imageUrl": null}));

        let parsed: AnalysisRequest =
            serde_json::from_value(json!({"imageUrl": "https://x/y.png"})).unwrap();
        assert_eq!(parsed.text, None);
        assert_eq!(parsed.image_url.as_deref(), Some("https://x/y.png"));
    }

    #[test]
    fn test_request_usable_content() {
        assert!(!AnalysisRequest::default().has_content());
        assert!(!AnalysisRequest::new(Some("   \n".into()), Some(String::new())).has_content());
        assert!(AnalysisRequest::new(Some(" x ".into()), None).has_content());
        assert!(AnalysisRequest::new(None, Some("https://img".into())).has_content());
    }

    #[test]
    fn test_verdict_is_case_insensitive() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "result": " FAKE ",
            "confidence": 90,
            "keywords": [],
            "explanation": ""
        }))
        .unwrap();
        assert_eq!(result.result, Verdict::Fake);
        assert!(serde_json::from_value::<AnalysisResult>(json!({
            "result": "uncertain",
            "confidence": 50
        }))
        .is_err());
    }

    #[test]
    fn test_confidence_is_rounded_and_clamped() {
        let parse = |c: serde_json::Value| {
            serde_json::from_value::<AnalysisResult>(json!({"result": "real", "confidence": c}))
                .map(|r| r.confidence)
        };
        assert_eq!(parse(json!(87)).unwrap(), 87);
        assert_eq!(parse(json!(87.6)).unwrap(), 88);
        assert_eq!(parse(json!(140)).unwrap(), 100);
        assert_eq!(parse(json!(-3)).unwrap(), 0);
        assert_eq!(parse(json!("92")).unwrap(), 92);
        assert_eq!(parse(json!(" 80% ")).unwrap(), 80);
        assert!(parse(json!("high")).is_err());
        assert!(parse(json!("NaN")).is_err());
        assert!(parse(json!(null)).is_err());
    }

    #[test]
    fn test_null_keywords_and_explanation_default_to_empty() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "result": "real",
            "confidence": 95,
            "keywords": null,
            "explanation": null
        }))
        .unwrap();
        assert_eq!(result.result, Verdict::Real);
        assert_eq!(result.confidence, 95);
        assert!(result.keywords.is_empty());
        assert_eq!(result.explanation, "");
    }

    #[test]
    fn test_result_round_trips_unchanged() {
        let original = json!({
            "result": "real",
            "confidence": 64,
            "keywords": ["sourced", "measured tone"],
            "explanation": "Cites a named agency."
        });
        let parsed: AnalysisResult = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), original);
    }
}
