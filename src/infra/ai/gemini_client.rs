// =============================================================================
// GEMINI CLIENT - Google AI Studio API Integration
// =============================================================================
//
// Implements the core `TextGenerator` and `ImageGenerator` ports against
// Google's Gemini `generateContent` endpoint
// (https://ai.google.dev/api/generate-content).
//
// **Wire format notes:**
// - Authentication: API key is passed as a query parameter (`?key=API_KEY`)
//   rather than a Bearer token in the Authorization header.
// - Request format: `contents[]` with nested `parts`, plus top-level
//   `generationConfig` and `safetySettings`.
// - Text lives at `candidates[0].content.parts[*].text`, images at
//   `candidates[*].content.parts[*].inlineData` (base64).
//
// **Environment Variables:**
// - `GEMINI_API_KEY` - Your API key from https://aistudio.google.com/apikey

use crate::core::ai::{
    models::{
        GeneratedImage, GenerationSettings, SafetySetting, CHAT_GENERATION, CHAT_SAFETY,
        IMAGE_GENERATION,
    },
    AiError, ImageGenerator, TextGenerator,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Cheapest text model that still answers well.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash-lite";

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// =============================================================================
// GEMINI API DATA STRUCTURES
// =============================================================================

/// A single part of content. Gemini uses a "parts" array to support
/// multimodal content, so every field is optional.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    /// Binary payload (images) returned by image-capable models.
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct InlineData {
    mime_type: String,
    /// Base64 encoded bytes.
    data: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

/// See: https://ai.google.dev/api/generate-content#generationconfig
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,

    /// Image models only return pictures when asked for the IMAGE modality.
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<&'static str>>,
}

impl From<GenerationSettings> for GenerationConfig {
    fn from(settings: GenerationSettings) -> Self {
        Self {
            temperature: settings.temperature,
            top_p: settings.top_p,
            top_k: settings.top_k,
            max_output_tokens: settings.max_output_tokens,
            response_modalities: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,

    /// Why the model stopped generating (e.g., "STOP", "SAFETY", "MAX_TOKENS").
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

// =============================================================================
// RESPONSE INTERPRETATION
// =============================================================================

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, like the official SDKs'
    /// `response.text()`.
    fn text(&self) -> Result<String, AiError> {
        let candidate = self.candidates.first().ok_or_else(|| {
            AiError::Blocked(
                self.prompt_feedback
                    .as_ref()
                    .and_then(|f| f.block_reason.clone())
                    .unwrap_or_else(|| "no candidates returned".to_string()),
            )
        })?;

        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse(
                candidate
                    .finish_reason
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            ));
        }

        Ok(text)
    }

    /// First inline image across all candidates, decoded.
    fn first_image(&self) -> Result<Option<GeneratedImage>, AiError> {
        let inline = self
            .candidates
            .iter()
            .flat_map(|c| c.content.parts.iter())
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| !d.data.is_empty());

        match inline {
            Some(data) => Ok(Some(GeneratedImage {
                mime_type: data.mime_type.clone(),
                bytes: STANDARD
                    .decode(&data.data)
                    .map_err(|e| AiError::Decode(Box::new(e)))?,
            })),
            None => Ok(None),
        }
    }
}

// =============================================================================
// GEMINI CLIENT IMPLEMENTATION
// =============================================================================

/// Client for Google's Gemini API.
///
/// # Example
/// ```ignore
/// let client = GeminiClient::new(std::env::var("GEMINI_API_KEY")?);
/// let answer = client.generate_text("what is 2+2").await?;
/// ```
pub struct GeminiClient {
    client: Client,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Overrides the model used for text answers.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    fn build_request(
        prompt: &str,
        settings: GenerationSettings,
        safety: &[SafetySetting],
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
            generation_config: settings.into(),
            safety_settings: safety.to_vec(),
        }
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let url = format!("{}/{}:generateContent?key={}", API_BASE, model, self.api_key);

        // Never log the URL, it carries the API key.
        tracing::debug!("Gemini request to model {}", model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(http_error)?;

            // Try to parse as Gemini error response for better error messages
            let message = serde_json::from_str::<GeminiErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(http_error)
    }
}

fn http_error(e: reqwest::Error) -> AiError {
    AiError::Http(Box::new(e))
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        let request = Self::build_request(prompt, CHAT_GENERATION, &CHAT_SAFETY);
        let response = self.generate_content(&self.text_model, &request).await?;
        let text = response.text()?;

        tracing::debug!("Gemini response received: {} chars", text.chars().count());
        Ok(text)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, AiError> {
        let mut request = Self::build_request(prompt, IMAGE_GENERATION, &[]);
        request.generation_config.response_modalities = Some(vec!["TEXT", "IMAGE"]);

        let response = self.generate_content(&self.image_model, &request).await?;
        response.first_image()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn chat_request_serializes_camel_case() {
        let request = GeminiClient::build_request("hello", CHAT_GENERATION, &CHAT_SAFETY);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert!(json["contents"][0]["parts"][0].get("inlineData").is_none());

        let config = &json["generationConfig"];
        assert_eq!(config["topK"], 1);
        assert_eq!(config["maxOutputTokens"], 2048);
        assert!(config.get("responseModalities").is_none());

        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            json["safetySettings"][0]["category"],
            "HARM_CATEGORY_HARASSMENT"
        );
    }

    #[test]
    fn image_request_omits_safety_settings() {
        let request = GeminiClient::build_request("a cat", IMAGE_GENERATION, &[]);
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("safetySettings").is_none());
        assert_eq!(json["generationConfig"]["topK"], 32);
    }

    #[test]
    fn text_joins_all_text_parts() {
        let response = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello, "},{"text":"world"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(response.text().unwrap(), "Hello, world");
    }

    #[test]
    fn missing_candidates_reports_block_reason() {
        let response = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        match response.text() {
            Err(AiError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected blocked error, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_reports_finish_reason() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[]},"finishReason":"SAFETY"}]}"#);
        match response.text() {
            Err(AiError::EmptyResponse(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected empty response error, got {:?}", other),
        }
    }

    #[test]
    fn inline_image_is_decoded() {
        let encoded = STANDARD.encode([1u8, 2, 3, 4]);
        let response = parse(&format!(
            r#"{{"candidates":[{{"content":{{"parts":[{{"text":"Here you go"}},{{"inlineData":{{"mimeType":"image/png","data":"{}"}}}}]}}}}]}}"#,
            encoded
        ));

        let image = response.first_image().unwrap().unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn response_without_image_is_none() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[{"text":"I can't draw"}]}}]}"#);
        assert!(response.first_image().unwrap().is_none());
    }

    #[test]
    fn corrupt_image_data_is_a_decode_error() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"***"}}]}}]}"#,
        );
        assert!(matches!(response.first_image(), Err(AiError::Decode(_))));
    }

    #[test]
    fn text_model_can_be_overridden() {
        let client = GeminiClient::new("key".to_string()).with_text_model("gemini-2.5-flash");
        assert_eq!(client.text_model(), "gemini-2.5-flash");
        assert_eq!(
            GeminiClient::new("key".to_string()).text_model(),
            DEFAULT_TEXT_MODEL
        );
    }
}
