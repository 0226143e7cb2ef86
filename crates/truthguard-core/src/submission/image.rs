//! Image selection and validation.

use base64::Engine;
use std::path::Path;
use tracing::debug;

use crate::error::{TruthguardError, TruthguardResult};

/// Largest accepted image (10 MiB).
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Check a declared media type and size. Type is checked first.
pub fn validate_image(content_type: &str, size: u64) -> TruthguardResult<()> {
    if !content_type.starts_with("image/") {
        return Err(TruthguardError::InvalidFileType(content_type.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(TruthguardError::FileTooLarge {
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// A validated image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> TruthguardResult<Self> {
        let content_type = content_type.into();
        validate_image(&content_type, bytes.len() as u64)?;
        Ok(Self {
            name: name.into(),
            content_type,
            bytes,
        })
    }

    /// Load an image from disk.
    ///
    /// The declared type comes from `content_type` or, failing that, the
    /// file extension. Type and size are validated from metadata before the
    /// file is read.
    pub async fn from_path(path: &Path, content_type: Option<&str>) -> TruthguardResult<Self> {
        let content_type = content_type
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(path)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });

        let metadata = tokio::fs::metadata(path).await?;
        validate_image(&content_type, metadata.len())?;

        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        debug!(name = %name, content_type = %content_type, size = bytes.len(), "Image selected");
        Self::new(name, content_type, bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Inline `data:` URL for the image.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}
