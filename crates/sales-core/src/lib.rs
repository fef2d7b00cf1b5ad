//! Core library for organizing raw sales records.
//!
//! This crate provides:
//! - Field extraction from loosely delimited lines (product code, price,
//!   purchase date, phone, email, customer name candidates)
//! - Customer name resolution with email anchoring and run-wide uniqueness
//! - A processing pipeline producing resolved records and run statistics

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod resolve;

pub use error::{InputError, Result, SalesError};
pub use extract::{ExtractionMatch, FieldExtractor, LineExtractor};
pub use models::config::SalesConfig;
pub use models::record::{FieldKind, FieldValue, LineExtraction, Resolution, ResolvedRecord};
pub use pipeline::{RunReport, RunStats, SalesProcessor};
pub use resolve::{AssignedNames, EntityResolver};
