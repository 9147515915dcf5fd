//! Resolved runtime configuration.
//!
//! Command-line flags and their environment fallbacks are parsed by
//! [`crate::cli::Cli`]; [`Config`] is the validated result that the rest of
//! the crate consumes. Nothing is read from or written to disk.

use crate::chunking::{
    DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, FixedChunker, MAX_CHUNK_SIZE, validate_sizes,
};
use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::inference::{DEFAULT_ENDPOINT, DEFAULT_MODEL, OllamaClient};
use url::Url;

/// Validated settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address of the Ollama server.
    pub endpoint: Url,
    /// Model identifier sent with each request.
    pub model: String,
    /// Chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub overlap: usize,
}

impl Config {
    /// Returns the built-in defaults: a local Ollama server, `llama2`, and
    /// 1000-character chunks overlapping by 200.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`Config::new`].
    pub fn defaults() -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP)
    }

    /// Builds and validates a configuration from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unparsable or non-HTTP endpoint or an
    /// empty model, and a chunking error for invalid chunk sizes.
    pub fn new(endpoint: &str, model: &str, chunk_size: usize, overlap: usize) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;

        let model = model.trim();
        if model.is_empty() {
            return Err(Error::Config {
                message: "model name must not be empty".to_string(),
            });
        }

        validate_sizes(chunk_size, overlap, MAX_CHUNK_SIZE)?;

        Ok(Self {
            endpoint,
            model: model.to_string(),
            chunk_size,
            overlap,
        })
    }

    /// Resolves the configuration from parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// See [`Config::new`].
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::new(&cli.endpoint, &cli.model, cli.chunk_size, cli.overlap)
    }

    /// Creates the chunker these settings describe.
    #[must_use]
    pub const fn chunker(&self) -> FixedChunker {
        FixedChunker::with_size_and_overlap(self.chunk_size, self.overlap)
    }

    /// Creates an Ollama client for the configured endpoint and model.
    ///
    /// # Errors
    ///
    /// Returns an inference error if the client cannot be built.
    pub fn client(&self) -> Result<OllamaClient> {
        OllamaClient::new(&self.endpoint, self.model.clone())
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::Config {
        message: format!("invalid endpoint '{raw}': {e}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config {
            message: format!("unsupported endpoint scheme '{other}' (expected http or https)"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunker;
    use crate::error::ChunkingError;
    use test_case::test_case;

    #[test]
    fn test_defaults() {
        let config = Config::defaults().unwrap();
        assert_eq!(config.endpoint.as_str(), "http://localhost:11434/");
        assert_eq!(config.model, "llama2");
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.overlap, 200);
    }

    #[test]
    fn test_new_valid() {
        let config = Config::new("https://gpu-box:8443/ollama", " mistral ", 500, 50).unwrap();
        assert_eq!(config.endpoint.host_str(), Some("gpu-box"));
        assert_eq!(config.model, "mistral");

        let chunker = config.chunker();
        assert_eq!(chunker.chunk_size(), 500);
        assert_eq!(chunker.overlap(), 50);
        assert_eq!(chunker.name(), "fixed");
    }

    #[test_case("not a url"; "unparsable")]
    #[test_case("ftp://localhost:11434"; "wrong scheme")]
    #[test_case("file:///tmp/socket"; "file scheme")]
    fn test_new_rejects_endpoint(endpoint: &str) {
        let err = Config::new(endpoint, "llama2", 1000, 200).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_new_rejects_empty_model() {
        let err = Config::new(DEFAULT_ENDPOINT, "  ", 1000, 200).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_new_rejects_overlap() {
        let err = Config::new(DEFAULT_ENDPOINT, "llama2", 100, 100).unwrap_err();
        assert!(matches!(
            err,
            Error::Chunking(ChunkingError::OverlapTooLarge { .. })
        ));
    }

    #[test]
    fn test_client() {
        let config = Config::defaults().unwrap();
        let client = config.client().unwrap();
        assert_eq!(client.chat_url().as_str(), "http://localhost:11434/api/chat");
    }
}
