//! Email and phone extraction.

use super::patterns::{EMAIL, PHONE};
use super::{find_all, ExtractionMatch, FieldExtractor};
use crate::models::FieldKind;

/// Email address extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for EmailExtractor {
    fn kind(&self) -> FieldKind {
        FieldKind::Email
    }

    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        find_all(FieldKind::Email, &EMAIL, text)
    }
}

/// Phone number extractor (`+<country> <digits>`).
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PhoneExtractor {
    fn kind(&self) -> FieldKind {
        FieldKind::Phone
    }

    fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        find_all(FieldKind::Phone, &PHONE, text)
    }
}

/// The part of an email address before the `@`.
pub fn email_local_part(email: &str) -> Option<&str> {
    email.split_once('@').map(|(local, _)| local)
}
