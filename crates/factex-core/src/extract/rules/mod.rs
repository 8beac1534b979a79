//! Rule-based field extractors for French invoices.

pub mod amounts;
pub mod dates;
pub mod number;
pub mod parties;
pub mod patterns;

pub use amounts::{extract_amounts, normalize_amount, AmountExtractor, AmountLabel, InvoiceAmounts};
pub use dates::{normalize_date, DateExtractor};
pub use number::{extract_invoice_number, InvoiceNumberExtractor};
pub use parties::{CustomerExtractor, SupplierExtractor};

/// Trait for field extractors.
///
/// Implementations hold no mutable state: the same extractor can be shared
/// across threads and documents.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, `None` when it is not found.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
