use async_trait::async_trait;
use geminichat_types::GenerationError;

pub mod gemini;
pub mod openai_compat;

/// Model client trait - one prompt in, the complete generated text out
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate an answer for `prompt`.
    ///
    /// Resolves only once the full answer is available. No retries.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Name of the model this client talks to
    fn model_name(&self) -> &str;
}

pub(crate) fn transport_error(err: reqwest::Error) -> GenerationError {
    GenerationError::Transport(err.to_string())
}

/// Turn a non-success HTTP response into `GenerationError::Api`
pub(crate) async fn api_error(response: reqwest::Response) -> GenerationError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    GenerationError::Api { status, body }
}
