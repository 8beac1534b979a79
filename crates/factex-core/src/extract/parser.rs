//! Text field extractor assembling one record per document.

use std::time::Instant;

use tracing::debug;

use crate::models::record::{ExtractedInvoiceRecord, DEFAULT_CURRENCY};

use super::rules::{
    extract_amounts, extract_invoice_number, CustomerExtractor, DateExtractor, FieldExtractor,
    SupplierExtractor,
};
use super::InvoiceExtractor;

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub record: ExtractedInvoiceRecord,
    /// Extractable fields that were not found.
    pub missing_fields: Vec<&'static str>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based extractor for French invoice text.
///
/// Every field is searched independently over the whole text, the first
/// match wins, and a field that matches nothing stays `None`.
#[derive(Debug, Clone)]
pub struct TextFieldExtractor {
    /// Currency written to every record.
    default_currency: String,
}

impl TextFieldExtractor {
    /// Create a new extractor with default settings.
    pub fn new() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Set the currency written to every record.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Currency written to every record.
    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    fn build_record(&self, text: &str) -> ExtractedInvoiceRecord {
        let amounts = extract_amounts(text);

        ExtractedInvoiceRecord {
            invoice_number: extract_invoice_number(text),
            issue_date: DateExtractor::new().extract(text),
            supplier_label: SupplierExtractor::new().extract(text),
            customer_label: CustomerExtractor::new().extract(text),
            currency_code: Some(self.default_currency.clone()),
            amount_before_tax: amounts.before_tax,
            tax_amount: amounts.tax,
            amount_with_tax: amounts.with_tax,
        }
    }
}

impl Default for TextFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceExtractor for TextFieldExtractor {
    fn extract(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        debug!("Extracting invoice fields from {} characters of text", text.len());

        let record = self.build_record(text);
        let missing_fields = record.missing_fields();

        debug!(
            "Found {:?}, missing {:?}",
            record.found_fields(),
            missing_fields
        );

        ExtractionResult {
            record,
            missing_fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
        Ma Super Entreprise

        Facture n° 2025-001
        Date : 31/01/2025

        Client : Société Exemple

        Total HT : 100,00 EUR
        TVA : 20,00 EUR
        Total TTC : 120,00 EUR
    "#;

    fn expected_sample() -> ExtractedInvoiceRecord {
        ExtractedInvoiceRecord {
            invoice_number: Some("2025-001".to_string()),
            issue_date: NaiveDate::from_ymd_opt(2025, 1, 31),
            supplier_label: Some("Ma Super Entreprise".to_string()),
            customer_label: Some("Société Exemple".to_string()),
            currency_code: Some("EUR".to_string()),
            amount_before_tax: Some(100.0),
            tax_amount: Some(20.0),
            amount_with_tax: Some(120.0),
        }
    }

    #[test]
    fn test_parse_basic_invoice() {
        let result = TextFieldExtractor::new().extract(SAMPLE);

        assert_eq!(result.record, expected_sample());
        assert!(result.missing_fields.is_empty());
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let upper = SAMPLE
            .replace("Facture n°", "FACTURE N°")
            .replace("Date :", "DATE :")
            .replace("Client :", "CLIENT :")
            .replace("Total HT", "TOTAL HT")
            .replace("Total TTC", "TOTAL TTC");

        let record = TextFieldExtractor::new().extract_record(&upper);
        assert_eq!(record, expected_sample());
    }

    #[test]
    fn test_missing_label_only_affects_its_field() {
        let text = SAMPLE.replace("Total HT : 100,00 EUR", "");
        let result = TextFieldExtractor::new().extract(&text);

        let expected = ExtractedInvoiceRecord {
            amount_before_tax: None,
            ..expected_sample()
        };
        assert_eq!(result.record, expected);
        assert_eq!(result.missing_fields, vec!["amount_before_tax"]);
    }

    #[test]
    fn test_empty_text() {
        let result = TextFieldExtractor::new().extract("");

        assert!(result.record.is_empty());
        assert_eq!(result.record.currency_code.as_deref(), Some("EUR"));
        assert_eq!(result.missing_fields.len(), 7);
    }

    #[test]
    fn test_custom_currency() {
        let extractor = TextFieldExtractor::new().with_default_currency("CHF");
        let record = extractor.extract_record(SAMPLE);

        assert_eq!(extractor.default_currency(), "CHF");
        assert_eq!(record.currency_code.as_deref(), Some("CHF"));
    }

    #[test]
    fn test_record_matches_field_helpers() {
        let text = "ACME\nFacture n° F/9\nTotal HT : 50,00\nT.V.A. : 10,00\nTotal TTC : 60,00";
        let record = TextFieldExtractor::new().extract_record(text);
        let amounts = extract_amounts(text);

        assert_eq!(record.invoice_number, extract_invoice_number(text));
        assert_eq!(record.invoice_number.as_deref(), Some("F/9"));
        assert_eq!(record.amount_before_tax, amounts.before_tax);
        assert_eq!(record.tax_amount, amounts.tax);
        assert_eq!(record.amount_with_tax, amounts.with_tax);
        assert_eq!(
            record.found_fields(),
            vec!["invoice_number", "supplier_label", "amount_before_tax", "tax_amount", "amount_with_tax"]
        );
    }

    #[test]
    fn test_carriage_return_only_text() {
        let text = SAMPLE.replace('\n', "\r");
        let record = TextFieldExtractor::new().extract_record(&text);
        assert_eq!(record, expected_sample());
    }

    #[test]
    fn test_no_cross_field_consistency() {
        let text = "ACME\nTotal HT : 100,00\nTVA : 5,00\nTotal TTC : 999,99";
        let record = TextFieldExtractor::new().extract_record(text);

        assert_eq!(record.amount_before_tax, Some(100.0));
        assert_eq!(record.tax_amount, Some(5.0));
        assert_eq!(record.amount_with_tax, Some(999.99));
    }
}
