//! Rule-based field matchers, one per field kind.

pub mod codes;
pub mod contact;
pub mod dates;
pub mod names;
pub mod patterns;

pub use codes::{PriceExtractor, ProductCodeExtractor};
pub use contact::{email_local_part, EmailExtractor, PhoneExtractor};
pub use dates::DateExtractor;
pub use names::NameExtractor;

use regex::Regex;

use crate::models::FieldKind;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The field kind this extractor recognizes.
    fn kind(&self) -> FieldKind;

    /// Extract all non-overlapping occurrences, left to right.
    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch>;

    /// Extract the leftmost occurrence.
    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        self.extract_all(text).into_iter().next()
    }
}

/// A field value matched in a line, with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    pub kind: FieldKind,
    /// Matched text.
    pub value: String,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
}

impl ExtractionMatch {
    pub fn new(kind: FieldKind, value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
        }
    }

    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Whether this match shares at least one byte with `[start, end)`.
    pub fn overlaps(&self, (start, end): (usize, usize)) -> bool {
        self.start < end && start < self.end
    }
}

/// All matches of `pattern` in `text`, tagged with `kind`.
pub(crate) fn find_all(kind: FieldKind, pattern: &Regex, text: &str) -> Vec<ExtractionMatch> {
    pattern
        .find_iter(text)
        .map(|m| ExtractionMatch::new(kind, m.as_str(), m.start(), m.end()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_half_open() {
        let m = ExtractionMatch::new(FieldKind::Price, "99.50", 7, 12);

        assert!(m.overlaps((0, 8)));
        assert!(m.overlaps((11, 20)));
        assert!(m.overlaps((8, 9)));
        assert!(!m.overlaps((0, 7)));
        assert!(!m.overlaps((12, 20)));
    }
}
