//! Gemini REST client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GatewayError, GenerationParams, GenerationRequest, LanguageModel};

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Header carrying the API key; it never appears in the request URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

// == Gemini Client ==
/// [`LanguageModel`] backed by the Gemini `generateContent` endpoint.
///
/// Without an API key every call fails with [`GatewayError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request(&self, api_key: &str, body: &GenerateContentBody<'_>) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(body)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::NotConfigured)?;
        let body = GenerateContentBody::from_request(request);

        let response = self
            .request(api_key, &body)
            .send()
            .await
            .map_err(|e| call_failed("request to model failed", e))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| call_failed("unreadable model response", e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GenerateContentResponse>(&raw)
                .ok()
                .and_then(|payload| payload.error)
                .map(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Err(GatewayError::CallFailed(format!(
                "model returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        let payload: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| GatewayError::CallFailed(format!("unreadable model response: {}", e)))?;
        let text = payload.text().ok_or_else(|| {
            GatewayError::CallFailed("model response contained no text".to_string())
        })?;
        debug!(model = %self.model, chars = text.len(), "gemini generateContent ok");
        Ok(text)
    }
}

/// Wraps a transport error without its request URL.
fn call_failed(context: &str, err: reqwest::Error) -> GatewayError {
    GatewayError::CallFailed(format!("{}: {}", context, err.without_url()))
}

// == Wire Types ==
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentBody<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig::from_params(&request.params),
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl GenerationConfig {
    fn from_params(params: &GenerationParams) -> Option<Self> {
        if params.is_empty() {
            return None;
        }
        Some(Self {
            max_output_tokens: params.max_output_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiErrorBody>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new("https://example.test/v1beta/", "gemini-1.5-flash", None);
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_empty_key_is_unconfigured() {
        let client = GeminiClient::new(DEFAULT_API_URL, DEFAULT_MODEL, Some(String::new()));
        assert!(!client.is_configured());
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_fast() {
        let client = GeminiClient::new(DEFAULT_API_URL, DEFAULT_MODEL, None);
        let result = client.generate(&GenerationRequest::new("hi")).await;
        assert_eq!(result, Err(GatewayError::NotConfigured));
    }

    #[tokio::test]
    async fn test_failed_call_does_not_leak_key() {
        let client = GeminiClient::new(
            "http://127.0.0.1:1",
            DEFAULT_MODEL,
            Some("SECRET_KEY_123".to_string()),
        );

        let err = client
            .generate(&GenerationRequest::new("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::CallFailed(_)));
        assert!(!err.to_string().contains("SECRET_KEY_123"));
        assert!(!err.to_string().contains("127.0.0.1"));
    }

    #[test]
    fn test_key_sent_as_header() {
        let client = GeminiClient::new(
            "https://example.test/v1beta",
            DEFAULT_MODEL,
            Some("SECRET_KEY_123".to_string()),
        );
        let prompt = GenerationRequest::new("hi");
        let request = client
            .request("SECRET_KEY_123", &GenerateContentBody::from_request(&prompt))
            .build()
            .unwrap();

        assert!(request.url().query().is_none());
        assert_eq!(request.headers()[API_KEY_HEADER], "SECRET_KEY_123");
    }

    #[test]
    fn test_request_body_with_params() {
        let request = GenerationRequest::new("Explain gravity").with_params(GenerationParams::chat());
        let body = serde_json::to_value(GenerateContentBody::from_request(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Explain gravity");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert!(body["generationConfig"]["topP"].is_number());
    }

    #[test]
    fn test_request_body_without_params() {
        let request = GenerationRequest::new("quiz me");
        let body = serde_json::to_value(GenerateContentBody::from_request(&request)).unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}}]
        }))
        .unwrap();
        assert_eq!(payload.text(), Some("Hello, world".to_string()));
    }

    #[test]
    fn test_response_without_candidates() {
        let payload: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(payload.text(), None);
    }

    #[test]
    fn test_error_payload() {
        let payload: GenerateContentResponse = serde_json::from_value(json!({
            "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        }))
        .unwrap();
        assert_eq!(payload.error.unwrap().message, "Quota exceeded");
    }
}
