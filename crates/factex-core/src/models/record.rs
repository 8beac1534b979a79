//! The structured record produced for one invoice.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Currency used when the document text does not say otherwise.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Fields extracted from a single invoice.
///
/// Every field is independently optional: `None` means "not found" and is
/// serialized as `null`. No consistency between the amounts is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedInvoiceRecord {
    /// Invoice number/identifier.
    pub invoice_number: Option<String>,

    /// Issue date (serialized as `YYYY-MM-DD`).
    pub issue_date: Option<NaiveDate>,

    /// Supplier, taken from the first non-blank line of the document.
    pub supplier_label: Option<String>,

    /// Customer, taken from the "Client"/"Destinataire" line.
    pub customer_label: Option<String>,

    /// Three-letter currency code.
    #[serde(default = "default_currency")]
    pub currency_code: Option<String>,

    /// Total before tax (Total HT).
    pub amount_before_tax: Option<f64>,

    /// Tax amount (TVA).
    pub tax_amount: Option<f64>,

    /// Total including tax (Total TTC).
    pub amount_with_tax: Option<f64>,
}

fn default_currency() -> Option<String> {
    Some(DEFAULT_CURRENCY.to_string())
}

impl Default for ExtractedInvoiceRecord {
    fn default() -> Self {
        Self {
            invoice_number: None,
            issue_date: None,
            supplier_label: None,
            customer_label: None,
            currency_code: default_currency(),
            amount_before_tax: None,
            tax_amount: None,
            amount_with_tax: None,
        }
    }
}

impl ExtractedInvoiceRecord {
    /// Names of the extractable fields, in serialization order.
    ///
    /// The currency is not listed since it is never searched for.
    pub const EXTRACTED_FIELDS: [&'static str; 7] = [
        "invoice_number",
        "issue_date",
        "supplier_label",
        "customer_label",
        "amount_before_tax",
        "tax_amount",
        "amount_with_tax",
    ];

    fn presence(&self) -> [bool; 7] {
        [
            self.invoice_number.is_some(),
            self.issue_date.is_some(),
            self.supplier_label.is_some(),
            self.customer_label.is_some(),
            self.amount_before_tax.is_some(),
            self.tax_amount.is_some(),
            self.amount_with_tax.is_some(),
        ]
    }

    /// Extractable fields that were located in the text.
    pub fn found_fields(&self) -> Vec<&'static str> {
        Self::EXTRACTED_FIELDS
            .iter()
            .zip(self.presence())
            .filter(|(_, present)| *present)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Extractable fields that were not located in the text.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::EXTRACTED_FIELDS
            .iter()
            .zip(self.presence())
            .filter(|(_, present)| !*present)
            .map(|(name, _)| *name)
            .collect()
    }

    /// True when nothing but the default currency is set.
    pub fn is_empty(&self) -> bool {
        self.presence().iter().all(|present| !present)
    }

    /// Currency code, falling back to the default.
    pub fn currency(&self) -> &str {
        self.currency_code.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_record_is_empty() {
        let record = ExtractedInvoiceRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.currency(), "EUR");
        assert_eq!(record.missing_fields().len(), 7);
        assert!(record.found_fields().is_empty());
    }

    #[test]
    fn test_serializes_absent_fields_as_null() {
        let record = ExtractedInvoiceRecord {
            invoice_number: Some("2025-001".to_string()),
            issue_date: NaiveDate::from_ymd_opt(2025, 1, 31),
            amount_with_tax: Some(120.0),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "invoice_number": "2025-001",
                "issue_date": "2025-01-31",
                "supplier_label": null,
                "customer_label": null,
                "currency_code": "EUR",
                "amount_before_tax": null,
                "tax_amount": null,
                "amount_with_tax": 120.0
            })
        );
    }

    #[test]
    fn test_found_and_missing_fields() {
        let record = ExtractedInvoiceRecord {
            supplier_label: Some("ACME".to_string()),
            tax_amount: Some(20.0),
            ..Default::default()
        };

        assert!(!record.is_empty());
        assert_eq!(record.found_fields(), vec!["supplier_label", "tax_amount"]);
        assert_eq!(
            record.missing_fields(),
            vec![
                "invoice_number",
                "issue_date",
                "customer_label",
                "amount_before_tax",
                "amount_with_tax"
            ]
        );
    }

    #[test]
    fn test_deserialize_without_currency_uses_default() {
        let record: ExtractedInvoiceRecord = serde_json::from_str(
            r#"{"invoice_number":"F-1","issue_date":null,"supplier_label":null,
                "customer_label":null,"amount_before_tax":null,"tax_amount":null,
                "amount_with_tax":null}"#,
        )
        .unwrap();

        assert_eq!(record.invoice_number.as_deref(), Some("F-1"));
        assert_eq!(record.currency_code.as_deref(), Some("EUR"));
    }
}
