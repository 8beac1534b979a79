//! Core library for invoice field extraction.
//!
//! This crate provides:
//! - PDF text extraction
//! - Best-effort field extraction from document text (invoice number, date,
//!   parties, pre-tax/tax/post-tax totals) with French-style normalization
//! - The extracted record model and its strict-mode JSON Schema

pub mod error;
pub mod extract;
pub mod input;
pub mod models;
pub mod pdf;
pub mod schema;

pub use error::{FactexError, PdfError, Result};
pub use extract::{ExtractionResult, InvoiceExtractor, TextFieldExtractor};
pub use extract::rules::{normalize_amount, normalize_date};
pub use input::{read_document_text, InputKind};
pub use models::config::FactexConfig;
pub use models::record::{ExtractedInvoiceRecord, DEFAULT_CURRENCY};
pub use pdf::{extract_text_from_path, PdfExtractor, PdfProcessor};
pub use schema::{record_schema, strict_schema};
