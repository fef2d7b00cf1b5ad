//! Line extractor combining the per-kind field matchers.

use tracing::trace;

use crate::models::{ExtractionConfig, FieldKind, FieldValue, LineExtraction};

use super::rules::{
    DateExtractor, EmailExtractor, ExtractionMatch, FieldExtractor, NameExtractor,
    PhoneExtractor, PriceExtractor, ProductCodeExtractor,
};

/// Extracts every field kind from one raw line.
///
/// Extraction is pure: the same line always yields the same result.
#[derive(Debug, Clone)]
pub struct LineExtractor {
    /// Whether a matched span is withheld from later field kinds.
    exclusive_spans: bool,
    product_code: ProductCodeExtractor,
    price: PriceExtractor,
    purchase_date: DateExtractor,
    phone: PhoneExtractor,
    email: EmailExtractor,
    name: NameExtractor,
}

impl LineExtractor {
    /// Create a line extractor with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            exclusive_spans: config.exclusive_spans,
            product_code: ProductCodeExtractor::new(),
            price: PriceExtractor::new(),
            purchase_date: DateExtractor::new().with_validation(config.validate_dates),
            phone: PhoneExtractor::new(),
            email: EmailExtractor::new(),
            name: NameExtractor::new(),
        }
    }

    /// Set span exclusivity.
    pub fn with_exclusive_spans(mut self, exclusive: bool) -> Self {
        self.exclusive_spans = exclusive;
        self
    }

    /// Set purchase date calendar validation.
    pub fn with_date_validation(mut self, validate: bool) -> Self {
        self.purchase_date = self.purchase_date.with_validation(validate);
        self
    }

    fn matcher(&self, kind: FieldKind) -> &dyn FieldExtractor {
        match kind {
            FieldKind::ProductCode => &self.product_code,
            FieldKind::Price => &self.price,
            FieldKind::PurchaseDate => &self.purchase_date,
            FieldKind::Phone => &self.phone,
            FieldKind::Email => &self.email,
            FieldKind::Name => &self.name,
        }
    }

    /// Extract all fields from `text`, the content of input line `line`.
    ///
    /// Kinds are matched in [`FieldKind::CLAIM_ORDER`]. With exclusive spans,
    /// a match touching bytes already claimed by an earlier kind is skipped
    /// and the next match of the same kind is tried.
    pub fn extract(&self, line: usize, text: &str) -> LineExtraction {
        let mut extraction = LineExtraction::new(line);
        let mut claimed: Vec<(usize, usize)> = Vec::new();

        for kind in FieldKind::CLAIM_ORDER {
            let free: Vec<ExtractionMatch> = self
                .matcher(kind)
                .extract_all(text)
                .into_iter()
                .filter(|m| !self.is_claimed(m, &claimed))
                .collect();

            if kind == FieldKind::Name {
                extraction.names = free.into_iter().map(|m| m.value).collect();
                continue;
            }

            if let (Some(slot), Some(m)) = (extraction.field_mut(kind), free.into_iter().next()) {
                claimed.push(m.span());
                *slot = FieldValue::Found(m.value);
            }
        }

        trace!(
            "Line {}: {} name candidate(s), email {}",
            line,
            extraction.names.len(),
            extraction.email
        );

        extraction
    }

    fn is_claimed(&self, m: &ExtractionMatch, claimed: &[(usize, usize)]) -> bool {
        self.exclusive_spans && claimed.iter().any(|span| m.overlaps(*span))
    }
}

impl Default for LineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_full_line() {
        let extractor = LineExtractor::new();
        let result = extractor.extract(
            1,
            "500123 99.50 01/02/23 +57 3001234567 jane.doe@mail.com Jane Doe",
        );

        assert_eq!(
            result,
            LineExtraction {
                line: 1,
                product_code: FieldValue::found("500123"),
                price: FieldValue::found("99.50"),
                purchase_date: FieldValue::found("01/02/23"),
                phone: FieldValue::found("+57 3001234567"),
                email: FieldValue::found("jane.doe@mail.com"),
                names: vec!["Jane Doe".to_string()],
            }
        );
    }

    #[test]
    fn test_field_order_is_not_assumed() {
        let extractor = LineExtractor::new();
        let result = extractor.extract(
            2,
            "Jane Doe\tjane.doe@mail.com\t+57 3001234567\t01/02/23\t99.50\t500123",
        );

        assert_eq!(result.product_code, FieldValue::found("500123"));
        assert_eq!(result.price, FieldValue::found("99.50"));
        assert_eq!(result.purchase_date, FieldValue::found("01/02/23"));
        assert_eq!(result.phone, FieldValue::found("+57 3001234567"));
        assert_eq!(result.email, FieldValue::found("jane.doe@mail.com"));
        assert_eq!(result.names, vec!["Jane Doe"]);
    }

    #[test]
    fn test_missing_fields_are_sentinels() {
        let extractor = LineExtractor::new();
        let result = extractor.extract(3, "nothing useful here");

        assert_eq!(result, LineExtraction::new(3));
        assert_eq!(result.product_code.as_str(), "N/A");
        assert_ne!(result.product_code, FieldValue::found(""));
    }

    #[test]
    fn test_fields_are_independent() {
        let extractor = LineExtractor::new();
        let result = extractor.extract(4, "paid 12.00 by Ana Ruiz");

        assert_eq!(result.price, FieldValue::found("12.00"));
        assert!(result.email.is_missing());
        assert!(result.product_code.is_missing());
        assert_eq!(result.names, vec!["Ana Ruiz"]);
    }

    #[test]
    fn test_price_next_to_currency_code() {
        let extractor = LineExtractor::new();

        let result = extractor.extract(11, "total 99.50COP Ana Ruiz");
        assert_eq!(result.price, FieldValue::found("99.50"));
        assert_eq!(result.names, vec!["Ana Ruiz"]);

        let result = extractor.extract(12, "USD99.50 Ana Ruiz");
        assert_eq!(result.price, FieldValue::found("99.50"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = LineExtractor::new();
        let line = "Sold by Jane Doe to John Smith 250.00 john.smith@example.com";

        assert_eq!(extractor.extract(5, line), extractor.extract(5, line));
    }

    #[test]
    fn test_price_span_is_not_a_product_code() {
        let extractor = LineExtractor::new();
        let result = extractor.extract(6, "123456.78 sold");

        assert_eq!(result.price, FieldValue::found("123456.78"));
        assert!(result.product_code.is_missing());
    }

    #[test]
    fn test_claimed_span_falls_through_to_next_match() {
        let extractor = LineExtractor::new();
        let result = extractor.extract(7, "123456.78 code 654321");

        assert_eq!(result.price, FieldValue::found("123456.78"));
        assert_eq!(result.product_code, FieldValue::found("654321"));
    }

    #[test]
    fn test_shared_spans_when_not_exclusive() {
        let extractor = LineExtractor::new().with_exclusive_spans(false);
        let result = extractor.extract(8, "123456.78 sold");

        assert_eq!(result.price, FieldValue::found("123456.78"));
        assert_eq!(result.product_code, FieldValue::found("123456"));
    }

    #[test]
    fn test_date_validation() {
        let line = "31/02/23 or 28/02/23";

        let lenient = LineExtractor::new().extract(9, line);
        assert_eq!(lenient.purchase_date, FieldValue::found("31/02/23"));

        let strict = LineExtractor::new().with_date_validation(true).extract(9, line);
        assert_eq!(strict.purchase_date, FieldValue::found("28/02/23"));
    }

    #[test]
    fn test_multiple_names_kept_in_order() {
        let extractor = LineExtractor::new();
        let result = extractor.extract(10, "Sold by Jane Doe to John Smith, signed Jane Doe");

        assert_eq!(result.names, vec!["Jane Doe", "John Smith", "Jane Doe"]);
    }
}
