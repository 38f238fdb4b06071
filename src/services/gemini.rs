//! Gemini generative text client.
//!
//! Used for the "similar titles" recommendations in the detail view. Requests are
//! single-shot: no streaming, no retries.

use crate::models::config::GeminiSettings;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source of generated text.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Send a single-turn prompt and return the first text part of the first candidate.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl GeminiConfig {
    /// Create config from settings.
    pub fn from_settings(settings: &GeminiSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::GeminiApiKeyMissing)?;

        Ok(Self {
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
        })
    }
}

/// Request payload.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

/// One conversation turn.
#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Text part.
#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response payload.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Response candidate.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateRequest {
    /// Single user turn carrying `prompt`.
    pub fn user_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, if the shape is complete.
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Create a new Gemini client from settings.
    pub fn from_settings(settings: &GeminiSettings) -> Result<Self> {
        Ok(Self::new(GeminiConfig::from_settings(settings)?))
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }
}

#[async_trait]
impl Recommender for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Requesting generation from {}", self.config.model);

        let resp = self
            .client
            .post(self.generate_url())
            .json(&GenerateRequest::user_prompt(prompt))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                endpoint: format!("models/{}:generateContent", self.config.model),
            });
        }

        let body: GenerateResponse = resp.json().await?;
        body.first_text()
            .ok_or_else(|| Error::UnexpectedResponse("Gemini generateContent".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let value = serde_json::to_value(GenerateRequest::user_prompt("hello")).unwrap();
        assert_eq!(
            value,
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_first_text() {
        let resp: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "Heat, Ronin, Collateral"}]}}]
        }))
        .unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("Heat, Ronin, Collateral"));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: "GEMINISECRET".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            model: "gemini-2.0-flash".to_string(),
        });

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        let shown = err.to_string();
        assert!(!shown.contains("GEMINISECRET"), "leaked key: {}", shown);
        assert!(!format!("{:?}", err).contains("GEMINISECRET"));
    }

    #[test]
    fn test_first_text_malformed_shapes() {
        for body in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{}]}}]}),
        ] {
            let resp: GenerateResponse = serde_json::from_value(body).unwrap();
            assert!(resp.first_text().is_none());
        }
    }
}
