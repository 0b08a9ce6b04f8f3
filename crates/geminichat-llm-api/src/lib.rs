//! # geminichat-llm-api
//!
//! The model client used by geminichat. A single `ModelClient` trait turns a
//! prompt into generated text; two backends implement it:
//! - Google Gemini (`generateContent`)
//! - OpenAI-compatible chat completions (OpenAI, llama.cpp)
//!
//! ## Example
//!
//! ```rust,no_run
//! use geminichat_llm_api::{BackendType, ClientFactory};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ClientFactory::create(
//!         BackendType::Gemini,
//!         std::env::var("GEMINI_API_KEY").ok(),
//!         "gemini-pro".to_string(),
//!         None,
//!     );
//!
//!     let text = client.generate("Hello!").await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;


pub use client::{gemini::GeminiClient, openai_compat::OpenAiCompatClient, ModelClient};

pub use config::{
    get_default_url_for_backend, normalize_api_url, BackendType, ClientFactory, GEMINI_API_URL,
    LLAMA_CPP_DEFAULT_URL, OPENAI_API_URL,
};
