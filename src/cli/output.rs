//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{Chunk, Message};
use crate::error::Error;
use crate::inference::ChatRequest;
use crate::io::truncate_graphemes;
use crate::session::{SessionStats, UploadReport};
use serde::Serialize;
use std::fmt::Write;

/// Graphemes shown in a chunk preview column.
const PREVIEW_WIDTH: usize = 48;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the chunks of one document.
#[must_use]
pub fn format_chunks(name: &str, chunks: &[Chunk], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_chunks_text(name, chunks),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ChunkRow<'a> {
                index: usize,
                start: usize,
                end: usize,
                chars: usize,
                overlap: usize,
                content: &'a str,
            }

            #[derive(Serialize)]
            struct ChunkListing<'a> {
                file: &'a str,
                count: usize,
                chunks: Vec<ChunkRow<'a>>,
            }

            let rows = chunks
                .iter()
                .map(|c| ChunkRow {
                    index: c.index,
                    start: c.start(),
                    end: c.end(),
                    chars: c.len(),
                    overlap: c.metadata.overlap,
                    content: &c.content,
                })
                .collect();

            format_json(&ChunkListing {
                file: name,
                count: chunks.len(),
                chunks: rows,
            })
        }
    }
}

fn format_chunks_text(name: &str, chunks: &[Chunk]) -> String {
    if chunks.is_empty() {
        return format!("{name}: no chunks (document is empty)\n");
    }

    let mut output = String::new();
    let _ = writeln!(output, "{name}: {} chunk(s)", chunks.len());
    let _ = writeln!(
        output,
        "{:<6} {:<10} {:<10} {:<8} Preview",
        "Index", "Start", "End", "Chars"
    );
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for chunk in chunks {
        let _ = writeln!(
            output,
            "{:<6} {:<10} {:<10} {:<8} {}",
            chunk.index,
            chunk.start(),
            chunk.end(),
            chunk.len(),
            preview(&chunk.content, PREVIEW_WIDTH)
        );
    }

    output
}

/// Formats a chat request body exactly as it would be sent.
///
/// The body is JSON in both formats; `Text` pretty-prints it.
#[must_use]
pub fn format_request(request: &ChatRequest<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", format_json(request)),
        OutputFormat::Json => serde_json::to_string(request).unwrap_or_else(|_| "{}".to_string()),
    }
}

/// Formats an assistant reply.
#[must_use]
pub fn format_reply(reply: &Message, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", reply.content),
        OutputFormat::Json => format_json(reply),
    }
}

/// Formats the result of an upload.
#[must_use]
pub fn format_upload_report(report: &UploadReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for name in &report.rejected {
                let _ = writeln!(output, "Rejected {name}: unsupported file type");
            }
            for (name, reason) in &report.failed {
                let _ = writeln!(output, "Failed to process {name}: {reason}");
            }
            let _ = writeln!(
                output,
                "Uploaded {} file(s), {} chunk(s) added",
                report.accepted.len(),
                report.chunks_added
            );
            output
        }
        OutputFormat::Json => format_json(report),
    }
}

/// Formats the uploaded file list.
#[must_use]
pub fn format_files(files: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if files.is_empty() {
                return "No files uploaded.\n".to_string();
            }
            let mut output = String::from("Uploaded files:\n");
            for name in files {
                let _ = writeln!(output, "  - {name}");
            }
            output
        }
        OutputFormat::Json => format_json(&files),
    }
}

/// Formats the transcript.
#[must_use]
pub fn format_history(history: &[Message], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if history.is_empty() {
                return "No messages yet.\n".to_string();
            }
            let mut output = String::new();
            for message in history {
                let _ = writeln!(output, "[{}] {}", message.role, message.content);
            }
            output
        }
        OutputFormat::Json => format_json(&history),
    }
}

/// Formats session counters.
#[must_use]
pub fn format_stats(stats: &SessionStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "  Files:         {}", stats.files);
            let _ = writeln!(output, "  Chunks:        {}", stats.chunks);
            let _ = writeln!(output, "  Context:       {} chars", stats.context_chars);
            let _ = writeln!(output, "  Messages:      {}", stats.messages);
            let _ = writeln!(output, "  State:         {}", stats.state);
            output
        }
        OutputFormat::Json => format_json(stats),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorBody {
                error: String,
            }
            format_json(&ErrorBody {
                error: error.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Single-line preview cut at a grapheme boundary.
fn preview(s: &str, max_graphemes: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let cut = truncate_graphemes(&flat, max_graphemes);
    if cut.len() < flat.len() {
        format!("{cut}...")
    } else {
        flat
    }
}
