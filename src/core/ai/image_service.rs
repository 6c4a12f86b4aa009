// One-shot image generation used by the `generate-image` binary.
//
// Nothing in the chat bot calls this. It shares the Gemini client through the
// `ImageGenerator` port and nothing else.

use super::ai_service::{AiError, ImageGenerator};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct ImageService<G: ImageGenerator> {
    generator: G,
}

impl<G: ImageGenerator> ImageService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Generates an image for `prompt` and writes it to `path`.
    ///
    /// Returns `Ok(false)` when the model replied without image data, in
    /// which case nothing is written.
    pub async fn generate_to_file(&self, prompt: &str, path: &Path) -> Result<bool, ImageError> {
        match self.generator.generate_image(prompt).await? {
            Some(image) => {
                std::fs::write(path, &image.bytes)?;
                tracing::info!(
                    path = %path.display(),
                    mime_type = %image.mime_type,
                    bytes = image.bytes.len(),
                    "Image saved"
                );
                Ok(true)
            }
            None => {
                tracing::warn!("No image data found in the response");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ai::models::GeneratedImage;
    use async_trait::async_trait;

    struct CannedImage(Option<GeneratedImage>);

    #[async_trait]
    impl ImageGenerator for CannedImage {
        async fn generate_image(&self, _: &str) -> Result<Option<GeneratedImage>, AiError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl ImageGenerator for Failing {
        async fn generate_image(&self, _: &str) -> Result<Option<GeneratedImage>, AiError> {
            Err(AiError::Blocked("SAFETY".to_string()))
        }
    }

    #[tokio::test]
    async fn writes_image_bytes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated-image.png");
        let service = ImageService::new(CannedImage(Some(GeneratedImage {
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        })));

        let saved = service.generate_to_file("a cat", &path).await.unwrap();

        assert!(saved);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn missing_image_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated-image.png");
        let service = ImageService::new(CannedImage(None));

        let saved = service.generate_to_file("a cat", &path).await.unwrap();

        assert!(!saved);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn generator_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated-image.png");
        let service = ImageService::new(Failing);

        let err = service.generate_to_file("a cat", &path).await.unwrap_err();

        assert!(matches!(err, ImageError::Ai(AiError::Blocked(_))));
    }
}
