//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesError};

/// Main configuration for a sales processing run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Customer name resolution configuration.
    pub resolution: ResolutionConfig,

    /// Output configuration used by the CLI.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// A span matched by one field kind cannot be reused by another.
    pub exclusive_spans: bool,

    /// Reject purchase dates that are not real calendar dates.
    pub validate_dates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            exclusive_spans: true,
            validate_dates: false,
        }
    }
}

/// Customer name resolution configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Emit a record with customer `N/A` for lines with no usable name.
    /// When false those lines are dropped.
    pub emit_unresolved: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            emit_unresolved: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: "json", "csv" or "text".
    pub default_format: String,

    /// Add the source line number as the first CSV/text column.
    pub include_line_numbers: bool,
}

impl OutputConfig {
    /// Accepted values of `default_format`, compared case-insensitively.
    pub const FORMATS: [&'static str; 3] = ["json", "csv", "text"];
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
            include_line_numbers: false,
        }
    }
}

impl SalesConfig {
    /// Load and validate configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate, then save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values the type system cannot.
    pub fn validate(&self) -> Result<()> {
        let format = &self.output.default_format;
        if !OutputConfig::FORMATS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(format))
        {
            return Err(SalesError::Config(format!(
                "unknown output.default_format {:?}, expected one of {}",
                format,
                OutputConfig::FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}
