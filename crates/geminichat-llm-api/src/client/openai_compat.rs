use async_trait::async_trait;
use geminichat_types::GenerationError;

use crate::client::{api_error, transport_error, ModelClient};

/// Client for OpenAI-compatible chat completion endpoints (OpenAI, llama.cpp server)
pub struct OpenAiCompatClient {
    api_key: Option<String>,
    model: String,
    api_url: String,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// `api_url` is the full chat completions URL, see `normalize_api_url`.
    pub fn new(api_key: Option<String>, model: String, api_url: String) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            api_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiCompatClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_request = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        let mut request = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&api_request);

        // llama.cpp servers usually run without a key
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let response_text = response.text().await.map_err(transport_error)?;
        let chat_response: serde_json::Value = serde_json::from_str(&response_text)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        match chat_response["choices"][0]["message"]["content"].as_str() {
            Some("") => Err(GenerationError::EmptyResponse),
            Some(content) => Ok(content.to_string()),
            None => Err(GenerationError::MalformedResponse(
                "no content in response".to_string(),
            )),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
