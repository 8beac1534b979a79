//! Output formats shared by the process and batch commands.

use factex_core::ExtractedInvoiceRecord;

/// CSV columns, in record order.
const CSV_HEADER: [&str; 8] = [
    "invoice_number",
    "issue_date",
    "supplier_label",
    "customer_label",
    "currency_code",
    "amount_before_tax",
    "tax_amount",
    "amount_with_tax",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for files written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn format_record(
    record: &ExtractedInvoiceRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// CSV cells for a record; absent fields are empty.
pub fn csv_row(record: &ExtractedInvoiceRecord) -> [String; 8] {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let amount = |v: Option<f64>| v.map(|a| a.to_string()).unwrap_or_default();

    [
        text(&record.invoice_number),
        record.issue_date.map(|d| d.to_string()).unwrap_or_default(),
        text(&record.supplier_label),
        text(&record.customer_label),
        text(&record.currency_code),
        amount(record.amount_before_tax),
        amount(record.tax_amount),
        amount(record.amount_with_tax),
    ]
}

pub fn csv_header() -> [&'static str; 8] {
    CSV_HEADER
}

fn format_csv(record: &ExtractedInvoiceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractedInvoiceRecord) -> String {
    let show = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    let currency = record.currency();
    let amount = |v: Option<f64>| show(v.map(|a| format!("{:.2} {}", a, currency)));

    let mut output = String::new();

    output.push_str(&format!("Invoice:  {}\n", show(record.invoice_number.clone())));
    output.push_str(&format!("Date:     {}\n", show(record.issue_date.map(|d| d.to_string()))));
    output.push('\n');

    output.push_str(&format!("Supplier: {}\n", show(record.supplier_label.clone())));
    output.push_str(&format!("Customer: {}\n", show(record.customer_label.clone())));
    output.push('\n');

    output.push_str("Summary:\n");
    output.push_str(&format!("  Total HT:  {}\n", amount(record.amount_before_tax)));
    output.push_str(&format!("  TVA:       {}\n", amount(record.tax_amount)));
    output.push_str(&format!("  Total TTC: {}\n", amount(record.amount_with_tax)));

    output
}
