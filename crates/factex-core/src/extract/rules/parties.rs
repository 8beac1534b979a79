//! Supplier and customer label extraction.

use super::patterns::CUSTOMER_LINE;
use super::FieldExtractor;

/// Characters that end a line. Besides `\n` this covers a lone `\r`, the
/// vertical tab, form feed, the file/group/record separators, NEL and the
/// Unicode line and paragraph separators.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Trimmed, non-blank lines of the text, in order.
///
/// A `\r\n` pair yields an empty piece between the two breaks, which the
/// blank filter drops.
fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_BREAKS).map(str::trim).filter(|l| !l.is_empty())
}

/// Supplier extractor: the first non-blank line of the document.
///
/// Purely positional, no label is searched for.
pub struct SupplierExtractor;

impl SupplierExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SupplierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SupplierExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        non_blank_lines(text).next().map(str::to_string)
    }
}

/// Customer extractor: the rest of the first line starting with
/// "Client" or "Destinataire".
pub struct CustomerExtractor;

impl CustomerExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CustomerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CustomerExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        non_blank_lines(text).find_map(|line| {
            let caps = CUSTOMER_LINE.captures(line)?;
            Some(caps.get(1)?.as_str().trim().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_is_first_non_blank_line() {
        let text = "\n   \n  Ma Super Entreprise  \nFacture n° 1\n";
        assert_eq!(
            SupplierExtractor::new().extract(text),
            Some("Ma Super Entreprise".to_string())
        );
    }

    #[test]
    fn test_supplier_empty_text() {
        assert_eq!(SupplierExtractor::new().extract(""), None);
        assert_eq!(SupplierExtractor::new().extract(" \n\t\n"), None);
    }

    #[test]
    fn test_customer_labels() {
        let extractor = CustomerExtractor::new();
        assert_eq!(
            extractor.extract("Client : Société Exemple"),
            Some("Société Exemple".to_string())
        );
        assert_eq!(
            extractor.extract("  DESTINATAIRE - Jean Dupont SARL"),
            Some("Jean Dupont SARL".to_string())
        );
        assert_eq!(
            extractor.extract("client:Atelier Martin"),
            Some("Atelier Martin".to_string())
        );
    }

    #[test]
    fn test_customer_first_matching_line_wins() {
        let text = "Adresse client : 3 rue des Lilas\nClient : A\nClient : B";
        assert_eq!(CustomerExtractor::new().extract(text), Some("A".to_string()));
    }

    #[test]
    fn test_lone_carriage_return_separates_lines() {
        let text = "Ma Super Entreprise\rFacture n° 1\rClient : Société Exemple";
        assert_eq!(
            SupplierExtractor::new().extract(text),
            Some("Ma Super Entreprise".to_string())
        );
        assert_eq!(
            CustomerExtractor::new().extract(text),
            Some("Société Exemple".to_string())
        );
    }

    #[test]
    fn test_form_feed_and_unicode_breaks_separate_lines() {
        let text = "\u{0c}ACME SARL\u{0c}Facture n° 2\u{2028}Destinataire : Atelier Martin\u{85}Total";
        assert_eq!(SupplierExtractor::new().extract(text), Some("ACME SARL".to_string()));
        assert_eq!(
            CustomerExtractor::new().extract(text),
            Some("Atelier Martin".to_string())
        );
    }

    #[test]
    fn test_crlf_text() {
        let text = "ACME\r\n\r\nClient : B\r\n";
        assert_eq!(SupplierExtractor::new().extract(text), Some("ACME".to_string()));
        assert_eq!(CustomerExtractor::new().extract(text), Some("B".to_string()));
    }

    #[test]
    fn test_customer_label_alone_is_skipped() {
        let text = "Client\nDestinataire : Société B";
        assert_eq!(
            CustomerExtractor::new().extract(text),
            Some("Société B".to_string())
        );
    }
}
