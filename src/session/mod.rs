//! Chat session state.
//!
//! A [`Session`] owns everything one conversation needs: the names of the
//! uploaded files, the chunk store built from them, the transcript, and
//! the idle/busy flag. Uploads and chat turns both take `&mut self`, so a
//! session never has more than one operation in flight.

pub mod state;
pub mod store;

pub use state::SessionState;
pub use store::ChunkStore;

use crate::chunking::{Chunker, FixedChunker};
use crate::core::document::display_name;
use crate::core::{Document, DocumentKind, Message};
use crate::error::{IoError, Result};
use crate::inference::InferenceClient;
use crate::io::read_document;
use crate::prompt::assemble_prompt;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Assistant reply recorded when the inference request fails.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error while processing your request.";

/// Outcome of one [`Session::upload`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    /// Accepted file names, in drop order.
    pub accepted: Vec<String>,
    /// File names refused because of their type.
    pub rejected: Vec<String>,
    /// Accepted files whose text could not be read, with the reason.
    pub failed: Vec<(String, String)>,
    /// Chunks appended to the store.
    pub chunks_added: usize,
}

/// Snapshot of session counters for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Uploaded files.
    pub files: usize,
    /// Chunks in the store.
    pub chunks: usize,
    /// Characters sent as context on every turn.
    pub context_chars: usize,
    /// Messages in the transcript.
    pub messages: usize,
    /// Current state.
    pub state: SessionState,
}

/// In-memory state of one chat session.
///
/// # Examples
///
/// ```
/// use refine_rs::core::Document;
/// use refine_rs::session::Session;
///
/// let mut session = Session::new();
/// session.add_document(Document::from_text("notes", "short text".to_string())).unwrap();
/// assert_eq!(session.files(), ["notes"]);
/// assert_eq!(session.chunks().len(), 1);
/// ```
pub struct Session {
    chunker: Box<dyn Chunker>,
    files: Vec<String>,
    chunks: ChunkStore,
    history: Vec<Message>,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("chunker", &self.chunker.name())
            .field("files", &self.files)
            .field("chunks", &self.chunks.len())
            .field("history", &self.history.len())
            .field("state", &self.state)
            .finish()
    }
}

impl Session {
    /// Creates an empty session with the default fixed-size chunker.
    #[must_use]
    pub fn new() -> Self {
        Self::with_chunker(FixedChunker::new())
    }

    /// Creates an empty session that chunks documents with `chunker`.
    #[must_use]
    pub fn with_chunker(chunker: impl Chunker + 'static) -> Self {
        Self {
            chunker: Box::new(chunker),
            files: Vec::new(),
            chunks: ChunkStore::new(),
            history: Vec::new(),
            state: SessionState::Idle,
        }
    }

    /// Names of the uploaded files, in upload order.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The chunk store.
    #[must_use]
    pub const fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    /// The transcript.
    #[must_use]
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` while an operation is running.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Returns the session counters.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            files: self.files.len(),
            chunks: self.chunks.len(),
            context_chars: self.chunks.total_chars(),
            messages: self.history.len(),
            state: self.state,
        }
    }

    /// Uploads files, one after another, in the given order.
    ///
    /// Files that are not `.txt`, `.pdf`, `.doc` or `.docx` are rejected and
    /// not listed. Every accepted file is listed before any text is read.
    /// A file that cannot be read or chunked is logged and contributes no
    /// chunks; the remaining files are still processed.
    pub fn upload<P: AsRef<Path>>(&mut self, paths: &[P]) -> UploadReport {
        let mut report = UploadReport::default();
        self.state = SessionState::Busy;

        let mut accepted = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let name = display_name(path);
            if DocumentKind::from_path(path).is_some() {
                accepted.push((self.files.len(), path, name.clone()));
                self.files.push(name.clone());
                report.accepted.push(name);
            } else {
                warn!(file = %name, "rejected upload: unsupported document type");
                report.rejected.push(name);
            }
        }

        for (document_id, path, name) in accepted {
            match read_document(path).and_then(|doc| self.ingest(document_id, &doc)) {
                Ok(added) => {
                    info!(file = %name, chunks = added, "document processed");
                    report.chunks_added += added;
                }
                Err(e) => {
                    warn!(file = %name, error = %e, "failed to process document");
                    report.failed.push((name, e.to_string()));
                }
            }
        }

        self.state = SessionState::Idle;
        report
    }

    /// Adds an already extracted document, listing its name and storing
    /// its chunks.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunker rejects its configuration; the
    /// document is still listed in that case.
    pub fn add_document(&mut self, document: Document) -> Result<usize> {
        let document_id = self.files.len();
        self.files.push(document.name.clone());
        self.ingest(document_id, &document)
    }

    /// Chunks a document and appends the chunks to the store.
    fn ingest(&mut self, document_id: usize, document: &Document) -> Result<usize> {
        let chunks = self.chunker.chunk(document_id, &document.content)?;
        let added = chunks.len();
        debug!(
            file = %document.name,
            chars = document.char_len(),
            chunks = added,
            strategy = self.chunker.name(),
            "chunked document"
        );
        self.chunks.extend(chunks);
        Ok(added)
    }

    /// Reads a single document from disk and adds it.
    ///
    /// Unlike [`Session::upload`], failures are returned to the caller and
    /// a file of the wrong type is not listed.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedType`] for rejected types and any
    /// read or chunking error.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        if DocumentKind::from_path(path).is_none() {
            return Err(IoError::UnsupportedType {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }
        let document = read_document(path)?;
        self.add_document(document)
    }

    /// Builds the messages a turn with `input` would send, without sending
    /// anything or touching the transcript.
    #[must_use]
    pub fn preview_prompt(&self, input: &str) -> Vec<Message> {
        assemble_prompt(self.chunks.as_slice(), &self.history, &Message::user(input))
    }

    /// Runs one chat turn.
    ///
    /// The user message is recorded first, then the whole chunk store and
    /// prior history are sent to `client`. Exactly one assistant message
    /// follows: the reply, or [`FALLBACK_REPLY`] if the request failed or
    /// the returned future was dropped before it completed.
    ///
    /// Returns `None` without doing anything if `input` is blank or the
    /// session is busy; otherwise returns the recorded assistant message.
    pub async fn submit<C>(&mut self, client: &C, input: &str) -> Option<&Message>
    where
        C: InferenceClient + ?Sized,
    {
        if input.trim().is_empty() || self.is_busy() {
            return None;
        }

        let user = Message::user(input);
        let messages = assemble_prompt(self.chunks.as_slice(), &self.history, &user);
        self.history.push(user);
        self.state = SessionState::Busy;

        debug!(
            model = client.model(),
            messages = messages.len(),
            context_chars = context_chars(&messages),
            "submitting chat turn"
        );

        let turn = TurnGuard {
            history: &mut self.history,
            state: &mut self.state,
        };
        let reply = match client.chat(&messages).await {
            Ok(content) => Message::assistant(content),
            Err(e) => {
                error!(error = %e, "chat request failed");
                Message::assistant(FALLBACK_REPLY)
            }
        };
        turn.finish(reply);

        self.history.last()
    }
}

/// Characters in the system entry of an assembled request.
fn context_chars(messages: &[Message]) -> usize {
    messages.first().map_or(0, |m| m.content.chars().count())
}

/// Closes a chat turn that is waiting on the model.
///
/// If the turn future is dropped before the reply arrives (a caller-side
/// timeout or `select!`), the fallback reply is recorded and the session
/// returns to idle, so the transcript keeps one assistant entry per user
/// entry.
struct TurnGuard<'a> {
    history: &'a mut Vec<Message>,
    state: &'a mut SessionState,
}

impl TurnGuard<'_> {
    fn finish(self, reply: Message) {
        self.history.push(reply);
        *self.state = SessionState::Idle;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if self.state.is_busy() {
            warn!("chat turn cancelled before a reply arrived");
            self.history.push(Message::assistant(FALLBACK_REPLY));
            *self.state = SessionState::Idle;
        }
    }
}
