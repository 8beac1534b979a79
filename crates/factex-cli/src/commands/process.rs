//! Process command - extract data from a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use factex_core::{read_document_text, InvoiceExtractor, TextFieldExtractor};

use super::config::load_config;
use super::output::{format_record, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Currency code written to the record (overrides the config)
    #[arg(long)]
    currency: Option<String>,

    /// List the fields that could not be found
    #[arg(long)]
    show_missing: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(currency) = &args.currency {
        config.extraction.default_currency = currency.to_uppercase();
        config.validate()?;
    }

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = read_document_text(&args.input, &config.pdf)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", args.input.display());
    }

    let extractor =
        TextFieldExtractor::new().with_default_currency(&config.extraction.default_currency);
    let result = extractor.extract(&text);

    if result.record.is_empty() {
        eprintln!(
            "{} No invoice field found in {}",
            style("!").yellow(),
            args.input.display()
        );
    }

    // Format output
    let pretty = args.pretty || config.output.pretty_json;
    let output = format_record(&result.record, args.format, pretty)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing {
        if result.missing_fields.is_empty() {
            eprintln!("{} All fields found", style("ℹ").blue());
        } else {
            eprintln!(
                "{} Missing fields: {}",
                style("ℹ").blue(),
                result.missing_fields.join(", ")
            );
        }
    }

    debug!(
        "Extraction took {}ms, total processing time: {:?}",
        result.processing_time_ms,
        start.elapsed()
    );

    Ok(())
}
