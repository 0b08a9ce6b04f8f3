use std::env;
use std::sync::Arc;

use crate::client::{gemini::GeminiClient, openai_compat::OpenAiCompatClient, ModelClient};
use crate::config::{get_default_url_for_backend, normalize_api_url, BackendType};

/// Client factory for creating model clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create a model client for the specified backend type
    ///
    /// # Arguments
    /// * `backend` - The backend type to use (Gemini, OpenAI, Llama)
    /// * `api_key` - API key; falls back to the backend's environment variable
    /// * `model` - Model name to use
    /// * `api_url` - Optional custom API URL (uses default if None)
    ///
    /// A missing key is not an error here. The client reports it on first use.
    pub fn create(
        backend: BackendType,
        api_key: Option<String>,
        model: String,
        api_url: Option<String>,
    ) -> Arc<dyn ModelClient> {
        let url = api_url.unwrap_or_else(|| get_default_url_for_backend(&backend));

        match backend {
            BackendType::Gemini => {
                let key = api_key.or_else(|| env::var("GEMINI_API_KEY").ok());
                Arc::new(GeminiClient::new(key, model, url))
            }
            BackendType::OpenAI => {
                let key = api_key.or_else(|| env::var("OPENAI_API_KEY").ok());
                Arc::new(OpenAiCompatClient::new(key, model, normalize_api_url(&url)))
            }
            BackendType::Llama => Arc::new(OpenAiCompatClient::new(
                api_key,
                model,
                normalize_api_url(&url),
            )),
        }
    }
}
