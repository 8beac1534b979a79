//! Invoice number extraction.

use super::patterns::INVOICE_NUMBER;
use super::FieldExtractor;

/// Invoice number extractor ("Facture n° 2025-001").
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = INVOICE_NUMBER.captures(text)?;
        Some(caps.get(1)?.as_str().trim().to_string())
    }
}

/// Extract the invoice number from text.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    InvoiceNumberExtractor::new().extract(text)
}
