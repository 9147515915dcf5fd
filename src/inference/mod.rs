//! Inference endpoint access.
//!
//! The [`InferenceClient`] trait is the seam between the chat session and
//! the model server, so sessions can be driven by the real Ollama client
//! or by a stand-in.

pub mod ollama;

pub use ollama::{ChatRequest, ChatResponse, OllamaClient, chat_url};

use crate::core::Message;
use crate::error::Result;
use async_trait::async_trait;

/// Default Ollama server address.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama2";

/// Chat API path, relative to the server address.
pub const CHAT_PATH: &str = "api/chat";

/// A chat-completion backend.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends the assembled messages and returns the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::InferenceError`] variants for transport
    /// failures, non-success statuses, and malformed responses.
    async fn chat(&self, messages: &[Message]) -> Result<String>;

    /// Returns the model identifier sent with each request.
    fn model(&self) -> &str;
}
