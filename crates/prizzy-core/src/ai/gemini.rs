use reqwest::Client;
use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use tracing::{debug, info};

use crate::mentor::{MentorRequest, MentorService, Turn, SYSTEM_INSTRUCTION};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize, Debug)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Debug)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiSystemInstruction,
    contents: Vec<GeminiContent>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiContent {
    fn from_turn(turn: &Turn) -> Self {
        Self {
            role: turn.role.to_string(),
            parts: vec![GeminiPart { text: turn.text.clone() }],
        }
    }
}

impl GeminiRequest {
    fn new(request: &MentorRequest) -> Self {
        let mut contents: Vec<GeminiContent> =
            request.history.iter().map(GeminiContent::from_turn).collect();
        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart { text: request.message.clone() }],
        });

        Self {
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiPart { text: SYSTEM_INSTRUCTION.to_string() }],
            },
            contents,
        }
    }
}

impl GeminiResponse {
    fn into_text(self) -> Result<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Gemini returned no candidates"))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(anyhow!("Gemini returned an empty reply"));
        }
        Ok(text)
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// A client with no key still constructs; every call then fails.
    pub fn new(api_key: Option<&str>, model: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.map(str::to_string),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    pub async fn query(&self, request: &MentorRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("Gemini API key not configured"))?;

        debug!(model = %self.model, turns = request.history.len(), "Sending mentor request");

        let response = self.client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&GeminiRequest::new(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {}: {}", status, text));
        }

        let gemini_response: GeminiResponse = response.json().await?;
        let text = gemini_response.into_text()?;
        info!(model = %self.model, chars = text.len(), "Mentor reply received");
        Ok(text)
    }
}

impl MentorService for GeminiClient {
    async fn generate(&self, request: &MentorRequest) -> Result<String> {
        self.query(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> MentorRequest {
        MentorRequest {
            history: vec![
                Turn { role: "model", text: "Hello!".to_string() },
                Turn { role: "user", text: "What is a pip?".to_string() },
                Turn { role: "model", text: "A price increment.".to_string() },
            ],
            message: "And a lot?".to_string(),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GeminiRequest::new(&request())).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], SYSTEM_INSTRUCTION);
        assert_eq!(
            body["contents"],
            json!([
                {"role": "model", "parts": [{"text": "Hello!"}]},
                {"role": "user", "parts": [{"text": "What is a pip?"}]},
                {"role": "model", "parts": [{"text": "A price increment."}]},
                {"role": "user", "parts": [{"text": "And a lot?"}]},
            ])
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "A lot is "}, {"text": "100,000 units."}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "A lot is 100,000 units.");
    }

    #[test]
    fn test_response_without_text_is_an_error() {
        let empty: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.into_text().is_err());

        let blocked: GeminiResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(blocked.into_text().is_err());
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(Some("k"), DEFAULT_MODEL, "http://localhost:8080/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = GeminiClient::new(None, DEFAULT_MODEL, DEFAULT_BASE_URL);
        assert!(!client.has_api_key());
        let err = client.generate(&request()).await.unwrap_err();
        assert!(err.to_string().contains("API key"));
    }
}
