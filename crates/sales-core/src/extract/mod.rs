//! Field extraction from raw sales lines.

mod line;
pub mod rules;

pub use line::LineExtractor;
pub use rules::{ExtractionMatch, FieldExtractor};
