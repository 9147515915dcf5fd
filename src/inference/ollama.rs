//! Ollama chat client.
//!
//! Sends one non-streaming `POST /api/chat` per turn and reads the reply
//! from `message.content`. There is no timeout and no retry: a hung server
//! keeps the caller waiting.

use super::{CHAT_PATH, InferenceClient};
use crate::core::Message;
use crate::error::{InferenceError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Model identifier.
    pub model: &'a str,
    /// Assembled message array.
    pub messages: &'a [Message],
    /// Always `false`; replies are read in one piece.
    pub stream: bool,
}

impl<'a> ChatRequest<'a> {
    /// Creates a non-streaming request.
    #[must_use]
    pub const fn new(model: &'a str, messages: &'a [Message]) -> Self {
        Self {
            model,
            messages,
            stream: false,
        }
    }
}

/// Response body of `POST /api/chat`. Only the reply text is read.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// The generated message.
    pub message: ResponseMessage,
}

/// The `message` object of a chat response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Reply text.
    pub content: String,
}

/// Client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    chat_url: Url,
    model: String,
}

impl OllamaClient {
    /// Creates a client for the server at `endpoint` using `model`.
    ///
    /// System proxy settings are ignored since the server is expected to be
    /// local.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::InvalidEndpoint`] if the chat URL cannot be
    /// derived from `endpoint`, or [`InferenceError::Connection`] if the
    /// HTTP client cannot be built.
    pub fn new(endpoint: &Url, model: impl Into<String>) -> Result<Self> {
        let chat_url = chat_url(endpoint)?;
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .map_err(InferenceError::from)?;

        Ok(Self {
            client,
            chat_url,
            model: model.into(),
        })
    }

    /// Returns the full chat URL.
    #[must_use]
    pub const fn chat_url(&self) -> &Url {
        &self.chat_url
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        let body = ChatRequest::new(&self.model, messages);
        debug!(
            url = %self.chat_url,
            model = %self.model,
            messages = messages.len(),
            "sending chat request"
        );

        let response = self
            .client
            .post(self.chat_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(InferenceError::from)?;

        let status = response.status();
        let text = response.text().await.map_err(InferenceError::from)?;

        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| InferenceError::Decode(e.to_string()))?;

        info!(
            model = %self.model,
            reply_chars = parsed.message.content.chars().count(),
            "received chat reply"
        );
        Ok(parsed.message.content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Derives the chat URL from a server base URL.
///
/// A base path without a trailing slash is treated as a directory, so
/// `http://host/ollama` becomes `http://host/ollama/api/chat`.
///
/// # Errors
///
/// Returns [`InferenceError::InvalidEndpoint`] if the URL cannot serve as a
/// base.
pub fn chat_url(endpoint: &Url) -> Result<Url> {
    if endpoint.cannot_be_a_base() {
        return Err(InferenceError::InvalidEndpoint(endpoint.to_string()).into());
    }
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let url = base.join(CHAT_PATH).map_err(InferenceError::from)?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("http://localhost:11434", "http://localhost:11434/api/chat"; "bare host")]
    #[test_case("http://localhost:11434/", "http://localhost:11434/api/chat"; "trailing slash")]
    #[test_case("http://gpu-box/ollama", "http://gpu-box/ollama/api/chat"; "sub path")]
    #[test_case("https://gpu-box/ollama/", "https://gpu-box/ollama/api/chat"; "sub path slash")]
    fn test_chat_url(endpoint: &str, expected: &str) {
        let endpoint = Url::parse(endpoint).unwrap();
        assert_eq!(chat_url(&endpoint).unwrap().as_str(), expected);
    }

    #[test]
    fn test_chat_url_rejects_non_base() {
        let endpoint = Url::parse("mailto:someone@example.com").unwrap();
        assert!(chat_url(&endpoint).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![Message::system("ctx"), Message::user("hi")];
        let body = serde_json::to_value(ChatRequest::new("llama2", &messages)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "model": "llama2",
                "messages": [
                    {"role": "system", "content": "ctx"},
                    {"role": "user", "content": "hi"}
                ],
                "stream": false
            })
        );
    }

    #[test]
    fn test_response_reads_message_content() {
        let raw = r#"{"model":"llama2","created_at":"2024-01-01T00:00:00Z",
            "message":{"role":"assistant","content":"The answer."},"done":true}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.message.content, "The answer.");
    }

    #[test]
    fn test_response_missing_message_is_error() {
        let raw = r#"{"error":"model 'llama2' not found"}"#;
        assert!(serde_json::from_str::<ChatResponse>(raw).is_err());
    }

    #[test]
    fn test_client_new() {
        let endpoint = Url::parse("http://localhost:11434").unwrap();
        let client = OllamaClient::new(&endpoint, "llama2").unwrap();
        assert_eq!(client.model(), "llama2");
        assert_eq!(client.chat_url().path(), "/api/chat");
    }
}
