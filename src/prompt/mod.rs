//! Prompt assembly.
//!
//! Turns the session's chunk store and conversation history into the
//! message array sent to the model: one system entry carrying every chunk
//! verbatim, then the prior history in order, then the new user message.
//!
//! The context is not truncated or ranked. Every chunk of every uploaded
//! document is sent on every turn, so the payload grows without bound as
//! documents are added; a bounded retrieval step would replace
//! [`build_context`] if that ever matters.

use crate::core::{Chunk, Message};

/// Instructions that open the system entry.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Use this context from the uploaded documents: ";

/// Label placed in front of the concatenated chunk text.
pub const CONTEXT_PREFIX: &str = "Context from documents: ";

/// Separator placed between chunk texts.
pub const CHUNK_SEPARATOR: &str = " ";

/// Builds the context note: the label followed by all chunk texts joined
/// with a single space.
///
/// With no chunks the label is still present, followed by nothing.
///
/// # Examples
///
/// ```
/// use refine_rs::core::Chunk;
/// use refine_rs::prompt::build_context;
///
/// let chunks = vec![
///     Chunk::new(0, "alpha".to_string(), 0..5, 0),
///     Chunk::new(1, "beta".to_string(), 0..4, 0),
/// ];
/// assert_eq!(build_context(&chunks), "Context from documents: alpha beta");
/// assert_eq!(build_context(&[]), "Context from documents: ");
/// ```
#[must_use]
pub fn build_context(chunks: &[Chunk]) -> String {
    let body_len: usize = chunks.iter().map(Chunk::byte_len).sum::<usize>()
        + chunks.len().saturating_sub(1) * CHUNK_SEPARATOR.len();
    let mut context = String::with_capacity(CONTEXT_PREFIX.len() + body_len);
    context.push_str(CONTEXT_PREFIX);

    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            context.push_str(CHUNK_SEPARATOR);
        }
        context.push_str(&chunk.content);
    }

    context
}

/// Builds the full system entry text.
#[must_use]
pub fn build_system_prompt(chunks: &[Chunk]) -> String {
    format!("{SYSTEM_PROMPT}{}", build_context(chunks))
}

/// Assembles the request messages for one chat turn.
///
/// The result always holds `history.len() + 2` entries: the system entry,
/// the history in original order, then `user`. Neither the history nor the
/// chunks are modified; recording the turn is the caller's job.
///
/// # Examples
///
/// ```
/// use refine_rs::core::{Message, Role};
/// use refine_rs::prompt::assemble_prompt;
///
/// let history = vec![Message::user("hi"), Message::assistant("hello")];
/// let messages = assemble_prompt(&[], &history, &Message::user("and now?"));
///
/// assert_eq!(messages.len(), 4);
/// assert_eq!(messages[0].role, Role::System);
/// assert_eq!(messages[3].content, "and now?");
/// ```
#[must_use]
pub fn assemble_prompt(chunks: &[Chunk], history: &[Message], user: &Message) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(build_system_prompt(chunks)));
    messages.extend_from_slice(history);
    messages.push(user.clone());
    messages
}
