use async_trait::async_trait;
use geminichat_types::GenerationError;
use serde::{Deserialize, Serialize};

use crate::client::{api_error, transport_error, ModelClient};

/// Google Gemini client using the `generateContent` endpoint
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    /// The key may be absent; `generate` then fails instead of the constructor.
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
                log::warn!("Gemini blocked the prompt: {}", reason);
            }
            return Err(GenerationError::EmptyResponse);
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            Err(GenerationError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        log::debug!("POST {} ({} prompt chars)", self.generate_content_url(), prompt.len());

        let response = self
            .client
            .post(self.generate_content_url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await.map_err(transport_error)?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        Self::extract_text(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
