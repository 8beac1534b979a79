//! Schema command - print the JSON Schema of the extracted record.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use factex_core::{record_schema, strict_schema};

/// Arguments for the schema command.
#[derive(Args)]
pub struct SchemaArgs {
    /// Close every object and require every property (structured-output strict mode)
    #[arg(long)]
    strict: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: SchemaArgs) -> anyhow::Result<()> {
    let schema = if args.strict {
        strict_schema(record_schema())
    } else {
        record_schema()
    };

    let content = serde_json::to_string_pretty(&schema)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &content)?;
        eprintln!(
            "{} Schema written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    Ok(())
}
