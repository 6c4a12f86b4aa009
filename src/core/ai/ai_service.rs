use super::models::GeneratedImage;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt was blocked by the model: {0}")]
    Blocked(String),

    #[error("Model returned no text (finish reason: {0})")]
    EmptyResponse(String),

    #[error("Failed to decode inline image data: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Port for anything that can turn a prompt into an answer.
///
/// The Discord layer only ever sees this trait, so tests can swap in a
/// canned generator instead of calling Gemini.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError>;
}

/// Port for image-capable models.
///
/// `Ok(None)` means the model answered without any inline image. That is
/// not treated as an error.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, AiError>;
}

// Blanket implementation for Box<dyn TextGenerator>
// so the router can hold a trait object built at startup.
#[async_trait]
impl TextGenerator for Box<dyn TextGenerator> {
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        (**self).generate_text(prompt).await
    }
}

#[async_trait]
impl ImageGenerator for Box<dyn ImageGenerator> {
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, AiError> {
        (**self).generate_image(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    #[tokio::test]
    async fn boxed_generator_delegates_to_inner() {
        let boxed: Box<dyn TextGenerator> = Box::new(Echo);
        assert_eq!(boxed.generate_text("hi").await.unwrap(), "echo: hi");
    }

    #[test]
    fn ai_error_messages_are_descriptive() {
        let api = AiError::Api {
            status: 400,
            message: "API key not valid".to_string(),
        };
        assert_eq!(api.to_string(), "Gemini API error (400): API key not valid");

        let blocked = AiError::Blocked("SAFETY".to_string());
        assert!(blocked.to_string().contains("SAFETY"));
    }
}
