//! Product code and price extraction.

use super::patterns::{PRICE, PRODUCT_CODE};
use super::{find_all, ExtractionMatch, FieldExtractor};
use crate::models::FieldKind;

/// Six-digit product code extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductCodeExtractor;

impl ProductCodeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for ProductCodeExtractor {
    fn kind(&self) -> FieldKind {
        FieldKind::ProductCode
    }

    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        find_all(FieldKind::ProductCode, &PRODUCT_CODE, text)
    }
}

/// Decimal price extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceExtractor;

impl PriceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PriceExtractor {
    fn kind(&self) -> FieldKind {
        FieldKind::Price
    }

    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        let mut matches = Vec::new();
        let mut pos = 0;

        // Resume at the end of the price, not of the whole match, so a single
        // separator can guard two neighbouring prices
        while let Some(caps) = PRICE.captures_at(text, pos) {
            let Some(price) = caps.get(1) else {
                break;
            };
            matches.push(ExtractionMatch::new(
                FieldKind::Price,
                price.as_str(),
                price.start(),
                price.end(),
            ));
            pos = price.end();
        }

        matches
    }
}
