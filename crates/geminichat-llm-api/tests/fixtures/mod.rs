use serde_json::json;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-pro";

/// Mock server utilities for testing model clients
pub struct ModelMockServer {
    server: MockServer,
}

impl ModelMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn gemini_path() -> String {
        format!("/v1beta/models/{}:generateContent", TEST_MODEL)
    }

    /// Mock a successful Gemini answer for `prompt`
    pub async fn mock_gemini_success(&self, prompt: &str, answer: &str) {
        Mock::given(method("POST"))
            .and(path(Self::gemini_path()))
            .and(header("x-goog-api-key", TEST_API_KEY))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": prompt}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": answer}]},
                    "finishReason": "STOP",
                    "index": 0
                }]
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock a Gemini error response
    pub async fn mock_gemini_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(Self::gemini_path()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {"code": status, "message": message, "status": "INVALID_ARGUMENT"}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 response whose body is not the expected JSON
    pub async fn mock_gemini_garbage(&self) {
        Mock::given(method("POST"))
            .and(path(Self::gemini_path()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any request reaches the server
    pub async fn expect_no_requests(&self) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Mock an OpenAI-compatible chat completion
    pub async fn mock_chat_completion(&self, content: Option<&str>) {
        let message = match content {
            Some(text) => json!({"role": "assistant", "content": text}),
            None => json!({"role": "assistant"}),
        };
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{"index": 0, "message": message, "finish_reason": "stop"}]
            })))
            .mount(&self.server)
            .await;
    }
}
