//! Purchase date extraction.

use chrono::NaiveDate;

use super::patterns::PURCHASE_DATE;
use super::{find_all, ExtractionMatch, FieldExtractor};
use crate::models::{FieldKind, PURCHASE_DATE_FORMAT};

/// `DD/MM/YY` purchase date extractor.
///
/// Matching is shape-only unless calendar validation is enabled, in which
/// case impossible dates such as `31/02/23` are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateExtractor {
    validate: bool,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self { validate: false }
    }

    /// Set whether to reject dates that do not exist in the calendar.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl FieldExtractor for DateExtractor {
    fn kind(&self) -> FieldKind {
        FieldKind::PurchaseDate
    }

    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        let mut results = find_all(FieldKind::PurchaseDate, &PURCHASE_DATE, text);
        if self.validate {
            results.retain(|m| is_calendar_date(&m.value));
        }
        results
    }
}

/// Whether a `DD/MM/YY` string names a real day.
pub fn is_calendar_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, PURCHASE_DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_shape() {
        let extractor = DateExtractor::new();

        assert_eq!(extractor.extract("bought 01/02/23").unwrap().value, "01/02/23");
        assert!(extractor.extract("bought 1/2/23").is_none());
        assert!(extractor.extract("bought 01/02/2023").is_none());
        assert!(extractor.extract("bought 01-02-23").is_none());
    }

    #[test]
    fn test_shape_only_by_default() {
        let extractor = DateExtractor::new();
        assert_eq!(extractor.extract("31/02/23").unwrap().value, "31/02/23");
    }

    #[test]
    fn test_validation_skips_impossible_dates() {
        let extractor = DateExtractor::new().with_validation(true);

        assert_eq!(extractor.extract("31/02/23 then 28/02/23").unwrap().value, "28/02/23");
        assert!(extractor.extract("99/99/99").is_none());
    }

    #[test]
    fn test_is_calendar_date() {
        assert!(is_calendar_date("29/02/24"));
        assert!(!is_calendar_date("29/02/23"));
    }
}
