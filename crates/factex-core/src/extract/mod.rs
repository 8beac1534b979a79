//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, TextFieldExtractor};

use crate::models::record::ExtractedInvoiceRecord;

/// Trait for invoice field extractors.
///
/// Extraction is best effort and never fails: fields that cannot be found
/// are left `None`.
pub trait InvoiceExtractor {
    /// Extract invoice fields from plain text, with diagnostics.
    fn extract(&self, text: &str) -> ExtractionResult;

    /// Extract invoice fields from plain text.
    fn extract_record(&self, text: &str) -> ExtractedInvoiceRecord {
        self.extract(text).record
    }
}
