//! Customer name candidate extraction.

use super::patterns::NAME;
use super::{find_all, ExtractionMatch, FieldExtractor};
use crate::models::FieldKind;

/// Two-word capitalized name extractor. A line may hold several candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for NameExtractor {
    fn kind(&self) -> FieldKind {
        FieldKind::Name
    }

    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        find_all(FieldKind::Name, &NAME, text)
    }
}
