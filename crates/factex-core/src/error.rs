//! Error types for the factex-core library.
//!
//! Field extraction itself never fails: a field that cannot be found or
//! normalized is simply absent from the record. The errors below cover the
//! layers around it, where the document text has to be obtained first.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the factex library.
#[derive(Error, Debug)]
pub enum FactexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The input file type is not handled.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The PDF file does not exist.
    #[error("PDF not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the factex library.
pub type Result<T> = std::result::Result<T, FactexError>;
