//! HTTP client for the analysis endpoint.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::model::{AnalysisRequest, AnalysisResult};
use crate::analysis::ContentAnalyzer;
use crate::error::{TruthguardError, TruthguardResult};

/// Default endpoint URL when running `truthguard serve` locally.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:3030/functions/v1/analyze-content";

/// Invokes a remote analysis endpoint.
#[derive(Clone)]
pub struct EndpointClient {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl EndpointClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Send `key` as bearer token and `apikey` header.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

#[async_trait]
impl ContentAnalyzer for EndpointClient {
    async fn analyze(&self, request: &AnalysisRequest) -> TruthguardResult<AnalysisResult> {
        debug!(endpoint = %self.endpoint, "Invoking analysis endpoint");

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key).header("apikey", key);
        }
        let response = builder.send().await?;

        let status = response.status();
        let text = response.text().await?;
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if let Some(message) = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(error_message)
        {
            warn!(
                status = status.as_u16(),
                error = %message,
                "Analysis endpoint reported an error"
            );
            return Err(TruthguardError::Endpoint(message));
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Analysis endpoint failed");
            return Err(TruthguardError::Endpoint(format!("HTTP {}", status)));
        }

        match body {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(serde_json::from_str(&text)?),
        }
    }
}

/// Message carried by an `error` field; any non-null, non-false value counts.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
