//! Regex patterns for French invoice extraction.
//!
//! Order matters wherever a list of patterns is tried: the first pattern
//! that matches wins, and within a pattern only the leftmost match counts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number: "Facture n° 2025-001", "FACTURE NO: F/12", "facture numéro A-7"
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Facture\s*(?:n°|no|numéro)?\s*[:\-]?\s*([A-Z0-9\-/]+)"
    ).unwrap();

    // Any supported date shape, used to locate the issue date
    pub static ref ANY_DATE: Regex = Regex::new(
        r"(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}|\d{4}-\d{2}-\d{2})"
    ).unwrap();

    // Date shapes tried by the normalizer, in this order
    pub static ref DATE_DMY_SLASH: Regex = Regex::new(
        r"(\d{1,2})/(\d{1,2})/(\d{4})"
    ).unwrap();

    pub static ref DATE_DMY_DASH: Regex = Regex::new(
        r"(\d{1,2})-(\d{1,2})-(\d{4})"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"(\d{4})-(\d{2})-(\d{2})"
    ).unwrap();

    pub static ref DATE_DMY_SLASH_SHORT: Regex = Regex::new(
        r"(\d{1,2})/(\d{1,2})/(\d{2})"
    ).unwrap();

    pub static ref DATE_DMY_DASH_SHORT: Regex = Regex::new(
        r"(\d{1,2})-(\d{1,2})-(\d{2})"
    ).unwrap();

    // Customer line: "Client : ...", "DESTINATAIRE - ..."
    pub static ref CUSTOMER_LINE: Regex = Regex::new(
        r"^(?i)(?:Client|Destinataire)\s*[:\-]?\s*(.+)"
    ).unwrap();

    // Labeled totals. The capture may run over whitespace (newlines
    // included) and is trimmed before normalization.
    pub static ref TOTAL_HT: Regex = Regex::new(
        r"(?i)Total\s+HT\s*[:\-]?\s*([\d\s.,]+)"
    ).unwrap();

    pub static ref TOTAL_TVA: Regex = Regex::new(
        r"(?i)(?:TVA|T\.V\.A\.)\s*[:\-]?\s*([\d\s.,]+)"
    ).unwrap();

    pub static ref TOTAL_TTC: Regex = Regex::new(
        r"(?i)Total\s+TTC\s*[:\-]?\s*([\d\s.,]+)"
    ).unwrap();

    // A plain decimal number, optionally signed, optionally with exponent
    pub static ref DECIMAL_NUMBER: Regex = Regex::new(
        r"[-+]?\d*\.?\d+(?:e[-+]?\d+)?"
    ).unwrap();
}
