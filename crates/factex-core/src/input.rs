//! Reading document text from files.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{FactexError, Result};
use crate::models::config::PdfConfig;
use crate::pdf::extract_text_from_path;

/// Kind of input file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// PDF with embedded text.
    Pdf,
    /// Plain UTF-8 text.
    Text,
}

impl InputKind {
    /// Detect the input kind from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Read the full text of a PDF or text document.
pub fn read_document_text(path: &Path, config: &PdfConfig) -> Result<String> {
    let kind = InputKind::from_path(path).ok_or_else(|| {
        FactexError::UnsupportedInput(format!("{} (expected .pdf, .txt or .text)", path.display()))
    })?;
    debug!("Reading {} as {:?}", path.display(), kind);

    let text = match kind {
        InputKind::Pdf => extract_text_from_path(path, config.decrypt_empty_password)?,
        InputKind::Text => std::fs::read_to_string(path)?,
    };

    let visible = text.chars().filter(|c| !c.is_whitespace()).count();
    if kind == InputKind::Pdf && visible < config.min_text_length {
        warn!(
            "{} has only {} characters of embedded text; scanned documents are not supported",
            path.display(),
            visible
        );
    }

    Ok(text)
}
