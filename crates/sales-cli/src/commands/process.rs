//! Process command - organize a single sales file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use tracing::{debug, info, warn};

use sales_core::models::config::SalesConfig;
use sales_core::{FieldKind, ResolvedRecord, RunReport, SalesProcessor};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (delimited text, one sale per line)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Show run statistics
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text table
    Text,
}

impl OutputFormat {
    /// The explicit format, or the configured default.
    pub fn resolve(explicit: Option<Self>, config: &SalesConfig) -> anyhow::Result<Self> {
        match explicit {
            Some(format) => Ok(format),
            None => Self::from_str(&config.output.default_format, true).map_err(|_| {
                anyhow::anyhow!(
                    "Unknown output format in config: {}",
                    config.output.default_format
                )
            }),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let processor = SalesProcessor::from_config(&config);
    let report = processor.process_file(&args.input)?;

    for warning in &report.warnings {
        warn!("{}", warning);
    }

    let output = format_records(&report.records, format, config.output.include_line_numbers)?;

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

    if args.stats {
        print_stats(&report);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render records in the requested format.
pub fn format_records(
    records: &[ResolvedRecord],
    format: OutputFormat,
    line_numbers: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records, line_numbers),
        OutputFormat::Text => Ok(format_text(records, line_numbers)),
    }
}

const COLUMNS: [&str; 6] = [
    "product_code",
    "price",
    "purchase_date",
    "customer_name",
    "email",
    "phone",
];

fn row(record: &ResolvedRecord) -> [&str; 6] {
    [
        record.product_code.as_str(),
        record.price.as_str(),
        record.purchase_date.as_str(),
        record.customer_name.as_str(),
        record.email.as_str(),
        record.phone.as_str(),
    ]
}

fn format_csv(records: &[ResolvedRecord], line_numbers: bool) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Write header
    let mut header: Vec<&str> = Vec::with_capacity(COLUMNS.len() + 1);
    if line_numbers {
        header.push("line");
    }
    header.extend(COLUMNS);
    wtr.write_record(&header)?;

    for record in records {
        let line = record.line.to_string();
        let mut fields: Vec<&str> = Vec::with_capacity(COLUMNS.len() + 1);
        if line_numbers {
            fields.push(&line);
        }
        fields.extend(row(record));
        wtr.write_record(&fields)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[ResolvedRecord], line_numbers: bool) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut cells = Vec::with_capacity(COLUMNS.len() + 1);
            if line_numbers {
                cells.push(record.line.to_string());
            }
            cells.extend(row(record).iter().map(|c| c.to_string()));
            cells
        })
        .collect();

    let mut header: Vec<String> = Vec::with_capacity(COLUMNS.len() + 1);
    if line_numbers {
        header.push("line".to_string());
    }
    header.extend(COLUMNS.iter().map(|c| c.to_string()));

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    output.push_str(&render(&header));
    output.push('\n');
    for cells in &rows {
        output.push_str(&render(cells));
        output.push('\n');
    }

    output
}

fn print_stats(report: &RunReport) {
    let stats = &report.stats;

    eprintln!();
    eprintln!(
        "{} {} lines, {} records in {}ms",
        style("ℹ").blue(),
        stats.lines,
        stats.records,
        report.processing_time_ms
    );
    eprintln!(
        "{} Customers: {} by email, {} by position, {} unresolved, {} dropped",
        style("ℹ").blue(),
        stats.email_anchored,
        stats.positional,
        stats.unresolved,
        stats.dropped
    );

    let missing: Vec<String> = FieldKind::SCALARS
        .iter()
        .chain(std::iter::once(&FieldKind::Name))
        .filter_map(|kind| stats.missing.get(kind).map(|n| format!("{} {}", kind, n)))
        .collect();
    if !missing.is_empty() {
        eprintln!("{} Missing: {}", style("ℹ").blue(), missing.join(", "));
    }

    eprintln!("{} Total price: {}", style("ℹ").blue(), stats.total_price);

    if !report.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &report.warnings {
            eprintln!("  - {}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_core::{FieldValue, Resolution};

    fn record(line: usize, name: FieldValue) -> ResolvedRecord {
        ResolvedRecord {
            line,
            product_code: FieldValue::found("500123"),
            price: FieldValue::found("99.50"),
            purchase_date: FieldValue::Missing,
            customer_name: name,
            email: FieldValue::found("jane.doe@mail.com"),
            phone: FieldValue::Missing,
            resolution: Resolution::EmailAnchored,
        }
    }

    #[test]
    fn test_format_csv() {
        let records = vec![record(1, FieldValue::found("Jane Doe")), record(3, FieldValue::Missing)];

        let csv = format_csv(&records, false).unwrap();
        assert_eq!(
            csv,
            "product_code,price,purchase_date,customer_name,email,phone\n\
             500123,99.50,N/A,Jane Doe,jane.doe@mail.com,N/A\n\
             500123,99.50,N/A,N/A,jane.doe@mail.com,N/A\n"
        );

        let csv = format_csv(&records, true).unwrap();
        assert!(csv.starts_with("line,product_code,"));
        assert!(csv.contains("\n3,500123,"));
    }

    #[test]
    fn test_format_text_aligns_columns() {
        let records = vec![record(1, FieldValue::found("Jane Doe"))];
        let text = format_text(&records, false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].find("customer_name"), lines[1].find("Jane Doe"));
    }

    #[test]
    fn test_format_from_config() {
        let mut config = SalesConfig::default();
        assert_eq!(OutputFormat::resolve(None, &config).unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Text), &config).unwrap(),
            OutputFormat::Text
        );

        config.output.default_format = "CSV".to_string();
        assert_eq!(OutputFormat::resolve(None, &config).unwrap(), OutputFormat::Csv);

        config.output.default_format = "xlsx".to_string();
        assert!(OutputFormat::resolve(None, &config).is_err());
    }
}
