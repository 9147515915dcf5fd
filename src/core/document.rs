//! Uploaded documents.
//!
//! A document is the extracted text of one uploaded file, tagged with the
//! kind of file it came from. Only the kinds in [`DocumentKind`] are
//! accepted for upload.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Accepted upload types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// `.txt` / `text/plain`.
    Text,
    /// `.pdf` / `application/pdf`.
    Pdf,
    /// `.doc` / `application/msword`.
    Doc,
    /// `.docx` / Office Open XML word processing document.
    Docx,
}

impl DocumentKind {
    /// All accepted kinds, in display order.
    pub const ALL: [Self; 4] = [Self::Pdf, Self::Text, Self::Doc, Self::Docx];

    /// Detects the kind from a file extension (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use refine_rs::core::DocumentKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(DocumentKind::from_path(Path::new("notes.TXT")), Some(DocumentKind::Text));
    /// assert_eq!(DocumentKind::from_path(Path::new("image.png")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }

    /// Returns the canonical file extension (without the dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Docx => "docx",
        }
    }

    /// Returns the MIME type.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Whether the format is binary.
    ///
    /// Binary formats have no text extractor; their raw bytes are decoded
    /// as text, which rarely yields meaningful content.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// The extracted text of one uploaded file.
///
/// # Examples
///
/// ```
/// use refine_rs::core::{Document, DocumentKind};
/// use std::path::PathBuf;
///
/// let doc = Document::from_file(PathBuf::from("docs/notes.txt"), DocumentKind::Text, "hi".to_string());
/// assert_eq!(doc.name, "notes.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display name (the file name).
    pub name: String,

    /// Source file path, if the document came from disk.
    pub source: Option<PathBuf>,

    /// Upload type.
    pub kind: DocumentKind,

    /// Extracted text.
    pub content: String,
}

impl Document {
    /// Creates a document from a file path and its extracted text.
    #[must_use]
    pub fn from_file(path: PathBuf, kind: DocumentKind, content: String) -> Self {
        Self {
            name: display_name(&path),
            source: Some(path),
            kind,
            content,
        }
    }

    /// Creates a plain-text document that did not come from disk.
    #[must_use]
    pub fn from_text(name: impl Into<String>, content: String) -> Self {
        Self {
            name: name.into(),
            source: None,
            kind: DocumentKind::Text,
            content,
        }
    }

    /// Returns the length of the text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Checks if the document has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Returns the file name of `path`, falling back to the full path.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().to_string(),
        |name| name.to_string_lossy().to_string(),
    )
}
