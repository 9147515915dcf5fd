//! File reading with memory mapping support.
//!
//! Provides efficient reading for both small and large uploads, and the
//! text extraction step that turns an accepted file into a [`Document`].

// Memory mapping requires unsafe but is sound for read-only access
#![allow(unsafe_code)]

use crate::core::{Document, DocumentKind};
use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Maximum file size to read into memory (1GB).
const MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// File reader with support for memory mapping.
///
/// Automatically chooses the reading strategy based on file size:
/// - Small files (< 1MB): Read directly into memory
/// - Large files (>= 1MB): Use memory mapping
///
/// # Examples
///
/// ```no_run
/// use refine_rs::io::FileReader;
///
/// let reader = FileReader::open("large_file.txt").unwrap();
/// let bytes = reader.read_to_bytes().unwrap();
/// ```
pub struct FileReader {
    /// File handle.
    file: File,
    /// File size in bytes.
    size: u64,
    /// File path for error messages.
    path: String,
}

impl FileReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, can't be opened, or is
    /// larger than 1GB.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let size = file
            .metadata()
            .map_err(|e| IoError::ReadFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
            .len();

        if size > MAX_FILE_SIZE {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
            }
            .into());
        }

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the file content as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn read_to_bytes(&self) -> Result<Vec<u8>> {
        if self.size >= MMAP_THRESHOLD {
            self.read_mmap_bytes()
        } else {
            self.read_direct_bytes()
        }
    }

    /// Reads the file content as strict UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or content is not valid UTF-8.
    pub fn read_to_string(&self) -> Result<String> {
        let bytes = self.read_to_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            IoError::ReadFailed {
                path: self.path.clone(),
                reason: format!("invalid UTF-8: {e}"),
            }
            .into()
        })
    }

    /// Reads bytes using memory mapping.
    fn read_mmap_bytes(&self) -> Result<Vec<u8>> {
        // Safety: the map is only read, and dropped before returning
        let mmap = unsafe {
            Mmap::map(&self.file).map_err(|e| IoError::MmapFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
        };

        Ok(mmap.to_vec())
    }

    /// Reads bytes directly into memory.
    #[allow(clippy::cast_possible_truncation)]
    fn read_direct_bytes(&self) -> Result<Vec<u8>> {
        let mut file = &self.file;
        let mut buffer = Vec::with_capacity(self.size as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| IoError::ReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }
}

/// Reads an uploaded file and extracts its text.
///
/// The upload type is detected from the file extension. Plain text must be
/// valid UTF-8. PDF, DOC and DOCX files have no text extractor: their raw
/// bytes are decoded as lossy UTF-8, which keeps the upload flowing but
/// rarely produces useful context.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedType`] for files that are not `.txt`,
/// `.pdf`, `.doc` or `.docx`, and read errors from [`FileReader`].
///
/// # Examples
///
/// ```no_run
/// use refine_rs::io::read_document;
///
/// let doc = read_document("notes.txt").unwrap();
/// println!("{} characters", doc.char_len());
/// ```
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let kind = DocumentKind::from_path(path).ok_or_else(|| IoError::UnsupportedType {
        path: path.to_string_lossy().to_string(),
    })?;

    let reader = FileReader::open(path)?;
    let content = if kind.is_binary() {
        let bytes = reader.read_to_bytes()?;
        warn!(
            path = reader.path(),
            kind = kind.extension(),
            "no text extractor for binary document, reading raw bytes as text"
        );
        String::from_utf8_lossy(&bytes).into_owned()
    } else {
        reader.read_to_string()?
    };

    debug!(
        path = reader.path(),
        mime = kind.mime_type(),
        bytes = reader.size(),
        "read document"
    );
    Ok(Document::from_file(path.to_path_buf(), kind, content))
}
