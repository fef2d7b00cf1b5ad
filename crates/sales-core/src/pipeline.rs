//! One processing run: decode, split into lines, extract, resolve.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{InputError, Result};
use crate::extract::LineExtractor;
use crate::models::{FieldKind, LineExtraction, Resolution, ResolvedRecord, SalesConfig};
use crate::resolve::{AssignedNames, EntityResolver};

/// Output of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Resolved records in input order.
    pub records: Vec<ResolvedRecord>,
    /// Run statistics.
    pub stats: RunStats,
    /// Non-fatal notes about individual lines.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Non-blank lines processed.
    pub lines: usize,
    /// Records emitted.
    pub records: usize,
    pub email_anchored: usize,
    pub positional: usize,
    /// Lines whose customer is `N/A`, emitted or not.
    pub unresolved: usize,
    /// Lines that produced no record.
    pub dropped: usize,
    /// Lines on which each field kind was not found.
    pub missing: BTreeMap<FieldKind, usize>,
    /// Sum of all parseable prices of emitted records.
    pub total_price: Decimal,
}

/// Runs the extractor and resolver over a whole input.
#[derive(Debug, Clone)]
pub struct SalesProcessor {
    extractor: LineExtractor,
    resolver: EntityResolver,
}

impl SalesProcessor {
    /// Create a processor with default settings.
    pub fn new() -> Self {
        Self::from_config(&SalesConfig::default())
    }

    pub fn from_config(config: &SalesConfig) -> Self {
        Self {
            extractor: LineExtractor::from_config(&config.extraction),
            resolver: EntityResolver::from_config(&config.resolution),
        }
    }

    /// Process a file read from disk.
    pub fn process_file(&self, path: &Path) -> Result<RunReport> {
        let data = std::fs::read(path)?;
        self.process_bytes(&data)
    }

    /// Process raw bytes, which must be UTF-8.
    pub fn process_bytes(&self, data: &[u8]) -> Result<RunReport> {
        let text = std::str::from_utf8(data).map_err(InputError::from)?;
        self.process_text(text)
    }

    /// Process decoded text. Blank lines are skipped but still counted for
    /// line numbering.
    pub fn process_text(&self, text: &str) -> Result<RunReport> {
        let start = Instant::now();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let lines: Vec<(usize, &str)> = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();

        if lines.is_empty() {
            return Err(InputError::Empty.into());
        }

        info!("Processing {} sales lines", lines.len());

        let extractions = self.extract_lines(&lines);
        let mut assigned = AssignedNames::new();
        let records = self.resolver.resolve(&extractions, &mut assigned);

        let (stats, warnings) = summarize(&extractions, &records);

        debug!(
            "Resolved {} records, {} unresolved, {} names assigned",
            stats.records,
            stats.unresolved,
            assigned.len()
        );

        Ok(RunReport {
            records,
            stats,
            warnings,
            processing_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Extract every line. The result keeps input order.
    pub fn extract_lines(&self, lines: &[(usize, &str)]) -> Vec<LineExtraction> {
        lines
            .iter()
            .map(|(number, text)| self.extractor.extract(*number, text))
            .collect()
    }
}

impl Default for SalesProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(
    extractions: &[LineExtraction],
    records: &[ResolvedRecord],
) -> (RunStats, Vec<String>) {
    let mut stats = RunStats {
        lines: extractions.len(),
        records: records.len(),
        ..RunStats::default()
    };
    let mut warnings = Vec::new();
    let mut emitted = records.iter().peekable();

    for extraction in extractions {
        for kind in FieldKind::SCALARS {
            if extraction.field(kind).is_some_and(|value| value.is_missing()) {
                *stats.missing.entry(kind).or_default() += 1;
            }
        }
        if extraction.names.is_empty() {
            *stats.missing.entry(FieldKind::Name).or_default() += 1;
        }

        let record = emitted.next_if(|r| r.line == extraction.line);
        let resolution = record.map_or(Resolution::Unresolved, |r| r.resolution);

        match resolution {
            Resolution::EmailAnchored => stats.email_anchored += 1,
            Resolution::Positional => stats.positional += 1,
            Resolution::Unresolved => stats.unresolved += 1,
        }

        if record.is_none() {
            stats.dropped += 1;
        }

        if resolution == Resolution::Unresolved && !extraction.names.is_empty() {
            warnings.push(format!(
                "Line {}: every name candidate was already assigned ({})",
                extraction.line,
                extraction.names.join(", ")
            ));
        }
    }

    stats.total_price = records.iter().filter_map(ResolvedRecord::price_value).sum();

    (stats, warnings)
}
