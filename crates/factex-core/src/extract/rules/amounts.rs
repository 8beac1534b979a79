//! Amount extraction for French invoices.

use regex::Regex;

use super::patterns::{DECIMAL_NUMBER, TOTAL_HT, TOTAL_TTC, TOTAL_TVA};
use super::FieldExtractor;

/// Normalize a French-formatted amount (e.g., "1 234,56" or "100,00 EUR").
///
/// Ordinary and non-breaking spaces are removed, commas become decimal
/// points, and the first number left in the string is parsed. Returns
/// `None` for empty input or when no number can be read.
pub fn normalize_amount<'a>(raw: impl Into<Option<&'a str>>) -> Option<f64> {
    let raw = raw.into()?;
    if raw.is_empty() {
        return None;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{00a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    DECIMAL_NUMBER.find(&cleaned)?.as_str().parse().ok()
}

/// Which labeled total to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountLabel {
    /// "Total HT": amount before tax.
    BeforeTax,
    /// "TVA" / "T.V.A.": tax amount.
    Tax,
    /// "Total TTC": amount including tax.
    WithTax,
}

impl AmountLabel {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::BeforeTax => &TOTAL_HT,
            Self::Tax => &TOTAL_TVA,
            Self::WithTax => &TOTAL_TTC,
        }
    }
}

/// Labeled amount extractor.
///
/// Only the first occurrence of the label is considered; if the text after
/// it does not read as a number the amount is absent, even when the label
/// appears again further down.
pub struct AmountExtractor {
    label: AmountLabel,
}

impl AmountExtractor {
    pub fn new(label: AmountLabel) -> Self {
        Self { label }
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = f64;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = self.label.pattern().captures(text)?;
        normalize_amount(caps.get(1)?.as_str().trim())
    }
}

/// Extracted totals from an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvoiceAmounts {
    /// Total before tax.
    pub before_tax: Option<f64>,
    /// Tax amount.
    pub tax: Option<f64>,
    /// Total including tax.
    pub with_tax: Option<f64>,
}

/// Extract the three labeled totals from invoice text.
///
/// The searches are independent; no total is derived from the others.
pub fn extract_amounts(text: &str) -> InvoiceAmounts {
    InvoiceAmounts {
        before_tax: AmountExtractor::new(AmountLabel::BeforeTax).extract(text),
        tax: AmountExtractor::new(AmountLabel::Tax).extract(text),
        with_tax: AmountExtractor::new(AmountLabel::WithTax).extract(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("1 234,56"), Some(1234.56));
        assert_eq!(normalize_amount("1\u{00a0}234,56"), Some(1234.56));
        assert_eq!(normalize_amount("100,00 EUR"), Some(100.0));
        assert_eq!(normalize_amount("1234.56"), Some(1234.56));
        assert_eq!(normalize_amount("-12,5"), Some(-12.5));
        assert_eq!(normalize_amount("1.5e3"), Some(1500.0));
    }

    #[test]
    fn test_normalize_amount_invalid() {
        assert_eq!(normalize_amount(None), None);
        assert_eq!(normalize_amount(""), None);
        assert_eq!(normalize_amount("n/a"), None);
        assert_eq!(normalize_amount("   "), None);
    }

    #[test]
    fn test_normalize_amount_dot_grouping_is_not_understood() {
        // "1.234,56" becomes "1.234.56"; the first number read is 1.234.
        assert_eq!(normalize_amount("1.234,56"), Some(1.234));
    }

    #[test]
    fn test_normalize_amount_non_ascii_digits() {
        // Matched as digits by the pattern but not parseable as f64.
        assert_eq!(normalize_amount("\u{661}\u{660}\u{660}"), None);
        assert_eq!(normalize_amount("\u{661}\u{660}\u{660} ou 100,00"), None);
    }

    #[test]
    fn test_extract_amounts() {
        let text = r#"
            Total HT : 1 000,00 EUR
            TVA 20% : 200,00 EUR
            Total TTC : 1 200,00 EUR
        "#;

        let amounts = extract_amounts(text);

        assert_eq!(amounts.before_tax, Some(1000.0));
        // The rate directly follows the label and is what gets captured.
        assert_eq!(amounts.tax, Some(20.0));
        assert_eq!(amounts.with_tax, Some(1200.0));
    }

    #[test]
    fn test_tax_label_variants() {
        let extractor = AmountExtractor::new(AmountLabel::Tax);
        assert_eq!(extractor.extract("T.V.A. : 19,60"), Some(19.6));
        assert_eq!(extractor.extract("tva - 5,50"), Some(5.5));
    }

    #[test]
    fn test_first_label_occurrence_wins_even_without_number() {
        let extractor = AmountExtractor::new(AmountLabel::Tax);
        let text = "N° TVA intracommunautaire FR12345678901\nTVA : 20,00";
        assert_eq!(extractor.extract(text), None);
    }

    #[test]
    fn test_missing_label() {
        let amounts = extract_amounts("Total TTC : 120,00");
        assert_eq!(amounts.before_tax, None);
        assert_eq!(amounts.tax, None);
        assert_eq!(amounts.with_tax, Some(120.0));
    }
}
