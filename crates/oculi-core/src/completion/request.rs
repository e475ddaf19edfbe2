//! Request types for completion operations.
//!
//! This module provides types for constructing completion requests, including
//! the text prompt, attached image inputs, and the output token bound.
//! Requests support both text-only and multi-image scenarios.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use uuid::Uuid;

use crate::error::Result;

/// Media type of an image attachment.
///
/// The variant is detected from the file extension when loading from disk;
/// unknown or missing extensions fall back to [`MediaType::Png`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, Serialize, Deserialize)]
pub enum MediaType {
    /// PNG image (`image/png`).
    #[default]
    #[strum(serialize = "image/png")]
    #[serde(rename = "image/png")]
    Png,
    /// JPEG image (`image/jpeg`).
    #[strum(serialize = "image/jpeg")]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    /// WebP image (`image/webp`).
    #[strum(serialize = "image/webp")]
    #[serde(rename = "image/webp")]
    Webp,
    /// GIF image (`image/gif`).
    #[strum(serialize = "image/gif")]
    #[serde(rename = "image/gif")]
    Gif,
}

impl MediaType {
    /// Detects the media type from a file path's extension.
    ///
    /// Falls back to [`MediaType::Png`] when the extension is missing or not
    /// a recognized image format.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => Self::Jpeg,
            Some("webp") => Self::Webp,
            Some("gif") => Self::Gif,
            _ => Self::Png,
        }
    }
}

/// Image input for multimodal completion requests.
///
/// Holds the transport-safe base64 encoding of one image's bytes. Inputs are
/// constructed immediately before a request and dropped once the attempt
/// completes; repeated paths are re-read and re-encoded every time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInput {
    /// Image data as a base64 encoded string.
    pub data: String,
    /// Media type of the image.
    pub media_type: MediaType,
}

impl ImageInput {
    /// Creates a new image input from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `data` is empty.
    pub fn from_bytes(data: &[u8], media_type: MediaType) -> Result<Self> {
        if data.is_empty() {
            return Err(crate::Error::invalid_input().with_message("empty image data"));
        }

        let data = base64::engine::general_purpose::STANDARD.encode(data);
        Ok(Self { data, media_type })
    }

    /// Reads an image from disk and encodes it.
    ///
    /// The media type is detected from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or an invalid input
    /// error if it is empty.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            crate::Error::io()
                .with_message(format!("failed to read image {}", path.display()))
                .with_source(err)
        })?;

        Self::from_bytes(&bytes, MediaType::from_path(path))
    }

    /// Renders this image as a `data:` URI suitable for chat APIs.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    /// Returns the estimated decoded size of the image in bytes.
    pub fn estimated_size(&self) -> usize {
        // Base64 encoding increases size by ~33%
        (self.data.len() * 3) / 4
    }
}

/// Request for a single completion operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    /// Model identifier to run the completion against.
    pub model: String,
    /// Text prompt for the model.
    pub prompt: String,
    /// Ordered images attached to the prompt.
    pub images: Vec<ImageInput>,
    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Creates a new text-only completion request.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            model: model.into(),
            prompt: prompt.into(),
            images: Vec::new(),
            max_tokens: None,
        }
    }

    /// Sets the images attached to this request.
    pub fn with_images(mut self, images: Vec<ImageInput>) -> Self {
        self.images = images;
        self
    }

    /// Adds an image to this request.
    pub fn add_image(mut self, image: ImageInput) -> Self {
        self.images.push(image);
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Returns the number of images attached to this request.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Returns true if this request carries no images.
    pub fn is_text_only(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_path() {
        assert_eq!(MediaType::from_path("figure.png"), MediaType::Png);
        assert_eq!(MediaType::from_path("figure.jpg"), MediaType::Jpeg);
        assert_eq!(MediaType::from_path("figure.JPEG"), MediaType::Jpeg);
        assert_eq!(MediaType::from_path("figure.webp"), MediaType::Webp);
        assert_eq!(MediaType::from_path("figure.gif"), MediaType::Gif);
    }

    #[test]
    fn test_media_type_falls_back_to_png() {
        assert_eq!(MediaType::from_path("figure"), MediaType::Png);
        assert_eq!(MediaType::from_path("figure.tiff"), MediaType::Png);
        assert_eq!(MediaType::from_path("dir.with.dots/figure"), MediaType::Png);
    }

    #[test]
    fn test_image_input_from_bytes() {
        let image = ImageInput::from_bytes(b"fake png bytes", MediaType::Png).unwrap();
        assert_eq!(image.data, "ZmFrZSBwbmcgYnl0ZXM=");
        assert_eq!(
            image.data_uri(),
            "data:image/png;base64,ZmFrZSBwbmcgYnl0ZXM="
        );
    }

    #[test]
    fn test_image_input_rejects_empty_bytes() {
        let error = ImageInput::from_bytes(b"", MediaType::Png).unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_image_input_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.jpg");
        std::fs::write(&path, b"jpeg payload").unwrap();

        let image = ImageInput::from_path(&path).await.unwrap();
        assert_eq!(image.media_type, MediaType::Jpeg);
        assert!(image.data_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_image_input_from_missing_path() {
        let error = ImageInput::from_path("/nonexistent/figure.png")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::Io);
    }

    #[test]
    fn test_request_builders() {
        let image = ImageInput::from_bytes(b"bytes", MediaType::Png).unwrap();
        let request = CompletionRequest::new("gpt-4o", "What is shown?")
            .add_image(image)
            .with_max_tokens(512);

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.image_count(), 1);
        assert!(!request.is_text_only());
        assert_eq!(request.max_tokens, Some(512));
    }
}
