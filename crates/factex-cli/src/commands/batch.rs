//! Batch processing command for multiple invoice files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use factex_core::models::config::PdfConfig;
use factex_core::{
    read_document_text, ExtractedInvoiceRecord, InputKind, InvoiceExtractor, TextFieldExtractor,
};

use super::config::load_config;
use super::output::{csv_header, csv_row, format_record, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<ExtractedInvoiceRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| InputKind::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Output names are settled up front so clashes fail before any work
    let names = match &args.output_dir {
        Some(output_dir) => {
            let names = output_names(&files)?;
            fs::create_dir_all(output_dir)?;
            names
        }
        None => Vec::new(),
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = Arc::new(
        TextFieldExtractor::new().with_default_currency(&config.extraction.default_currency),
    );
    let pdf_config = Arc::new(config.pdf.clone());
    let permits = Arc::new(Semaphore::new(args.jobs.max(1)));

    // Extraction holds no shared state, so files run on the blocking pool
    // and only the number in flight is bounded.
    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let extractor = Arc::clone(&extractor);
        let pdf_config = Arc::clone(&pdf_config);
        let permits = Arc::clone(&permits);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let task_path = path.clone();
            let result = tokio::task::spawn_blocking(move || {
                process_single_file(&task_path, &extractor, &pdf_config)
            })
            .await?;
            anyhow::Ok((path, result))
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let (path, (result, processing_time_ms)) = handle.await??;

        match result {
            Ok(record) => {
                results.push(ProcessResult {
                    path,
                    record: Some(record),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    // Write outputs
    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Results are in input order, so they line up with the output names
    for (index, result) in results.iter().enumerate() {
        if let Some(record) = &result.record {
            let content = format_record(record, args.format, config.output.pretty_json)?;

            match &args.output_dir {
                Some(output_dir) => {
                    let output_path =
                        output_dir.join(format!("{}.{}", names[index], args.format.extension()));

                    fs::write(&output_path, content)?;
                    debug!("Wrote output to {}", output_path.display());
                }
                None => println!("{}", content),
            }
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file name, without the format extension, for every input.
///
/// The file stem is used unless another input has the same stem, in which
/// case the full file name is kept (`a.pdf` and `a.txt` give `a.pdf.json`
/// and `a.txt.json`). Inputs that would still share a name are rejected.
fn output_names(files: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    fn stem(path: &Path) -> String {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("invoice")
            .to_string()
    }

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for path in files {
        *stem_counts.entry(stem(path)).or_default() += 1;
    }

    let mut taken: HashMap<String, &Path> = HashMap::new();
    let mut names = Vec::with_capacity(files.len());
    for path in files {
        let name = if stem_counts[&stem(path)] > 1 {
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice")
                .to_string()
        } else {
            stem(path)
        };

        if let Some(other) = taken.insert(name.clone(), path.as_path()) {
            anyhow::bail!(
                "{} and {} would both be written as {}",
                other.display(),
                path.display(),
                name
            );
        }
        names.push(name);
    }

    Ok(names)
}

/// Extract one file, returning the outcome and the time it took.
fn process_single_file(
    path: &Path,
    extractor: &TextFieldExtractor,
    pdf_config: &PdfConfig,
) -> (anyhow::Result<ExtractedInvoiceRecord>, u64) {
    let file_start = Instant::now();

    let result = read_document_text(path, pdf_config)
        .map_err(anyhow::Error::from)
        .and_then(|text| {
            if text.trim().is_empty() {
                anyhow::bail!("No text extracted from {}", path.display());
            }
            Ok(extractor.extract(&text).record)
        });

    (result, file_start.elapsed().as_millis() as u64)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(csv_header());
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let (status, cells) = match &result.record {
            Some(record) => ("success", csv_row(record)),
            None => ("error", Default::default()),
        };

        let mut row = vec![filename, status.to_string()];
        row.extend(cells);
        row.push(result.processing_time_ms.to_string());
        row.push(result.error.clone().unwrap_or_default());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
