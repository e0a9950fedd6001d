//! Gemini provider (Generative Language API, non-streaming).

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

use super::{
    BoxFuture, CompletionProvider, ProviderError, ProviderResult, classify_reqwest_error,
    resolve_api_key, resolve_base_url,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Low temperature keeps command translations close to deterministic.
const TEMPERATURE: f64 = 0.1;

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_output_tokens: Option<u32>,
}

impl GeminiConfig {
    /// Creates a new config from environment.
    ///
    /// Authentication resolution order:
    /// 1. `config_api_key` parameter (from config file)
    /// 2. `GEMINI_API_KEY` environment variable
    ///
    /// `GEMINI_BASE_URL` overrides the base URL (useful for tests).
    pub fn from_env(
        model: String,
        max_output_tokens: Option<u32>,
        config_base_url: Option<&str>,
        config_api_key: Option<&str>,
    ) -> Result<Self> {
        let api_key = resolve_api_key(config_api_key, "GEMINI_API_KEY", "gemini")?;
        let base_url = resolve_base_url(
            config_base_url,
            "GEMINI_BASE_URL",
            DEFAULT_BASE_URL,
            "Gemini",
        )?;

        Ok(Self {
            api_key,
            base_url,
            model,
            max_output_tokens,
        })
    }
}

/// Gemini client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Sends a single-turn text prompt and returns the first candidate's text.
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let request = build_generate_request(prompt, self.config.max_output_tokens);
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        tracing::debug!(model = %self.config.model, "sending completion request");

        let response = self
            .http
            .post(url)
            .headers(build_headers(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::http_status(status.as_u16(), &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::parse(format!("Invalid response JSON: {e}")))?;
        extract_candidate_text(&value)
    }
}

impl CompletionProvider for GeminiClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(self.generate(prompt))
    }
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(api_key) {
        headers.insert("x-goog-api-key", value);
    }
    headers
}

fn build_generate_request(prompt: &str, max_output_tokens: Option<u32>) -> Value {
    let mut generation_config = json!({
        "temperature": TEMPERATURE,
    });
    if let Some(max) = max_output_tokens {
        generation_config["maxOutputTokens"] = json!(max);
    }

    json!({
        "contents": [{
            "role": "user",
            "parts": [{
                "text": prompt
            }]
        }],
        "generationConfig": generation_config,
    })
}

/// Pulls the text parts out of the first candidate.
fn extract_candidate_text(value: &Value) -> ProviderResult<String> {
    let parts = value
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::parse("Response contained no candidates"))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(ProviderError::parse("Candidate contained no text parts"));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::providers::ProviderErrorKind;

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            model: "gemini-1.5-flash".to_string(),
            max_output_tokens: None,
        })
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "parts": [{"text": "ls *.txt"}]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server).generate("hello").await.unwrap();
        assert_eq!(text, "ls *.txt");
    }

    #[tokio::test]
    async fn test_generate_maps_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::HttpStatus);
        assert_eq!(err.details.as_deref(), Some("overloaded"));
    }

    #[tokio::test]
    async fn test_generate_maps_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Parse);
    }
}
