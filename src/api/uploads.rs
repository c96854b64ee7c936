//! Image uploads for test request references.

use crate::error::{AppError, AppResult};
use crate::services::ApiClient;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Response of the upload endpoint. Not wrapped in an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Server-relative public URL, e.g. `/static/test-request-images/ab12.png`.
    pub url: String,
}

pub struct UploadsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UploadsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Upload image bytes as multipart field `file`.
    pub async fn upload_test_request_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<UploadedImage> {
        if !content_type.starts_with("image/") {
            return Err(AppError::invalid_input_field(
                format!("Only image files can be uploaded, got '{}'", content_type),
                "file",
            ));
        }

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::invalid_input_field(e.to_string(), "file"))?;
        let form = Form::new().part("file", part);

        self.client
            .post_multipart("/uploads/test-request-images", form)
            .await
    }

    /// Read an image from disk and upload it.
    pub async fn upload_test_request_image_file(&self, path: &Path) -> AppResult<UploadedImage> {
        let content_type = image_mime_for(path).ok_or_else(|| {
            AppError::invalid_input_field(
                format!("Unsupported image type: {}", path.display()),
                "file",
            )
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::invalid_input_field(format!("Failed to read {}: {}", path.display(), e), "file")
        })?;

        self.upload_test_request_image(&file_name, content_type, bytes)
            .await
    }
}

/// MIME type for common image extensions.
fn image_mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime_for() {
        assert_eq!(image_mime_for(Path::new("shot.PNG")), Some("image/png"));
        assert_eq!(image_mime_for(Path::new("a/b/photo.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime_for(Path::new("notes.txt")), None);
        assert_eq!(image_mime_for(Path::new("README")), None);
    }
}
