//! Data models shared by the extractor, resolver and pipeline.

pub mod config;
pub mod record;

pub use config::{ExtractionConfig, OutputConfig, ResolutionConfig, SalesConfig};
pub use record::{
    FieldKind, FieldValue, LineExtraction, Resolution, ResolvedRecord, NOT_AVAILABLE,
    PURCHASE_DATE_FORMAT,
};
