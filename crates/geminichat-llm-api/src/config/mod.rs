pub mod factory;
pub use factory::ClientFactory;

/// Backend type for the model client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Gemini,
    OpenAI,
    Llama,
}

impl BackendType {
    /// Parse backend type from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAI),
            "llama" | "llamacpp" | "llama.cpp" | "llama-cpp" => Some(Self::Llama),
            _ => None,
        }
    }

    /// Guess the backend from an API URL.
    ///
    /// URLs mentioning "openai" select OpenAI, any other explicit URL is taken
    /// to be a llama.cpp server, and no URL means Gemini.
    pub fn from_url(api_url: Option<&str>) -> Self {
        match api_url {
            Some(url) if url.contains("generativelanguage") => Self::Gemini,
            Some(url) if url.contains("openai") => Self::OpenAI,
            Some(_) => Self::Llama,
            None => Self::Gemini,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAI => "openai",
            Self::Llama => "llama",
        }
    }
}

/// Default Gemini API base URL
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default OpenAI API URL
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Where a llama.cpp server listens unless told otherwise
pub const LLAMA_CPP_DEFAULT_URL: &str = "http://localhost:8080";

/// Get the default URL for a given backend type
pub fn get_default_url_for_backend(backend: &BackendType) -> String {
    match backend {
        BackendType::Gemini => GEMINI_API_URL.to_string(),
        BackendType::OpenAI => OPENAI_API_URL.to_string(),
        BackendType::Llama => normalize_api_url(LLAMA_CPP_DEFAULT_URL),
    }
}

/// Normalize API URL by ensuring it has the correct path for OpenAI-compatible endpoints
pub fn normalize_api_url(url: &str) -> String {
    // If URL already contains a path with "completions", use it as-is
    if url.contains("/completions") || url.contains("/chat") {
        return url.to_string();
    }

    if url.ends_with('/') {
        format!("{}v1/chat/completions", url)
    } else {
        format!("{}/v1/chat/completions", url)
    }
}
