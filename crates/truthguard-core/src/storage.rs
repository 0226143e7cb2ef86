//! Object storage for submitted images.
//!
//! Images are uploaded under a timestamp-derived name and referenced by
//! their public URL. Retention and access control belong to the store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{TruthguardError, TruthguardResult};

/// Default bucket for submitted images.
pub const DEFAULT_BUCKET: &str = "verification-images";

/// A binary object store with public URL lookup.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under `name`.
    async fn upload(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> TruthguardResult<()>;

    /// Public URL of the object stored under `name`.
    fn public_url(&self, name: &str) -> String;
}

/// Object name for an upload: `<unix millis>.<extension of original name>`.
///
/// A name without a `.` is used whole as the extension.
pub fn object_name(original_name: &str, now: DateTime<Utc>) -> String {
    let ext = original_name.rsplit('.').next().unwrap_or(original_name);
    format!("{}.{}", now.timestamp_millis(), ext)
}

/// Connection settings for [`SupabaseStorage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Key sent as bearer token and `apikey` header.
    pub api_key: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

impl StorageConfig {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: default_bucket(),
        }
    }

    pub fn with_bucket(mut self, bucket: &str) -> Self {
        self.bucket = bucket.to_string();
        self
    }
}

/// Supabase-compatible storage REST client.
#[derive(Clone)]
pub struct SupabaseStorage {
    config: StorageConfig,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl SupabaseStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, self.config.bucket, name
        )
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> TruthguardResult<()> {
        let url = self.object_url(name);
        let size = bytes.len();
        debug!(url = %url, size, content_type, "Uploading image");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("apikey", &self.config.api_key)
            .header("content-type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %text, "Image upload failed");
            let message = serde_json::from_str::<StorageErrorBody>(&text)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(TruthguardError::storage(message));
        }

        debug!(name, size, "Image uploaded");
        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, self.config.bucket, name
        )
    }
}
