//! Customer name resolution across all lines of a run.

use tracing::{debug, warn};

use crate::extract::rules::email_local_part;
use crate::models::{FieldValue, LineExtraction, Resolution, ResolutionConfig, ResolvedRecord};

use super::{normalize_key, AssignedNames};

/// Chooses one customer name per line, never reusing a name within a run.
///
/// Priority per line, among candidates not yet assigned:
/// 1. the first candidate equal to the normalized email local part,
/// 2. the first candidate,
/// 3. `N/A`.
#[derive(Debug, Clone)]
pub struct EntityResolver {
    /// Emit records whose customer could not be resolved.
    emit_unresolved: bool,
}

impl EntityResolver {
    /// Create a resolver with default settings.
    pub fn new() -> Self {
        Self::from_config(&ResolutionConfig::default())
    }

    pub fn from_config(config: &ResolutionConfig) -> Self {
        Self {
            emit_unresolved: config.emit_unresolved,
        }
    }

    /// Set whether lines without a usable name still produce a record.
    pub fn with_emit_unresolved(mut self, emit: bool) -> Self {
        self.emit_unresolved = emit;
        self
    }

    /// Resolve `extractions` in order, recording chosen names in `assigned`.
    pub fn resolve(
        &self,
        extractions: &[LineExtraction],
        assigned: &mut AssignedNames,
    ) -> Vec<ResolvedRecord> {
        extractions
            .iter()
            .filter_map(|extraction| self.resolve_line(extraction, assigned))
            .collect()
    }

    /// Resolve one line against the names assigned by earlier lines.
    ///
    /// A chosen name is inserted into `assigned` before returning.
    pub fn resolve_line(
        &self,
        extraction: &LineExtraction,
        assigned: &mut AssignedNames,
    ) -> Option<ResolvedRecord> {
        let (customer_name, resolution) = match choose(extraction, assigned) {
            Some((name, resolution)) => {
                assigned.insert(name);
                (FieldValue::found(name), resolution)
            }
            None => {
                if extraction.names.is_empty() {
                    debug!("Line {}: no name candidates", extraction.line);
                } else {
                    warn!(
                        "Line {}: all {} name candidate(s) already assigned",
                        extraction.line,
                        extraction.names.len()
                    );
                }
                (FieldValue::Missing, Resolution::Unresolved)
            }
        };

        debug!(
            "Line {}: customer {} ({:?})",
            extraction.line, customer_name, resolution
        );

        if resolution == Resolution::Unresolved && !self.emit_unresolved {
            return None;
        }

        Some(ResolvedRecord {
            line: extraction.line,
            product_code: extraction.product_code.clone(),
            price: extraction.price.clone(),
            purchase_date: extraction.purchase_date.clone(),
            customer_name,
            email: extraction.email.clone(),
            phone: extraction.phone.clone(),
            resolution,
        })
    }
}

impl Default for EntityResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the customer for one line without mutating `assigned`.
fn choose<'a>(
    extraction: &'a LineExtraction,
    assigned: &AssignedNames,
) -> Option<(&'a str, Resolution)> {
    let candidates: Vec<&str> = extraction
        .names
        .iter()
        .map(String::as_str)
        .filter(|name| !assigned.contains(name))
        .collect();

    let local_key = extraction
        .email
        .value()
        .and_then(email_local_part)
        .map(normalize_key);

    if let Some(key) = local_key {
        if let Some(name) = candidates.iter().find(|name| normalize_key(name) == key) {
            return Some((*name, Resolution::EmailAnchored));
        }
    }

    candidates.first().map(|name| (*name, Resolution::Positional))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn line(number: usize, names: &[&str], email: Option<&str>) -> LineExtraction {
        let extraction = LineExtraction::new(number).with_names(names.iter().copied());
        match email {
            Some(email) => extraction.with_email(email),
            None => extraction,
        }
    }

    fn customers(records: &[ResolvedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.customer_name.as_str()).collect()
    }

    #[test]
    fn test_email_match_beats_position() {
        let resolver = EntityResolver::new();
        let mut assigned = AssignedNames::new();

        let records = resolver.resolve(
            &[line(1, &["Jane Doe", "John Smith"], Some("john.smith@example.com"))],
            &mut assigned,
        );

        assert_eq!(customers(&records), vec!["John Smith"]);
        assert_eq!(records[0].resolution, Resolution::EmailAnchored);
    }

    #[test]
    fn test_positional_fallback() {
        let resolver = EntityResolver::new();

        for email in [None, Some("ab12@x.com")] {
            let mut assigned = AssignedNames::new();
            let records = resolver.resolve(&[line(1, &["Ana Ruiz"], email)], &mut assigned);

            assert_eq!(customers(&records), vec!["Ana Ruiz"]);
            assert_eq!(records[0].resolution, Resolution::Positional);
        }
    }

    #[test]
    fn test_exhausted_candidate_is_unresolved() {
        let resolver = EntityResolver::new();
        let mut assigned = AssignedNames::new();

        let records = resolver.resolve(
            &[line(1, &["Carlos Vega"], None), line(2, &["Carlos Vega"], None)],
            &mut assigned,
        );

        assert_eq!(customers(&records), vec!["Carlos Vega", "N/A"]);
        assert_eq!(records[1].resolution, Resolution::Unresolved);
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn test_drop_unresolved() {
        let resolver = EntityResolver::new().with_emit_unresolved(false);
        let mut assigned = AssignedNames::new();

        let records = resolver.resolve(
            &[
                line(1, &["Carlos Vega"], None),
                line(2, &["Carlos Vega"], None),
                line(3, &[], Some("x@y.com")),
                line(4, &["Ana Ruiz"], None),
            ],
            &mut assigned,
        );

        assert_eq!(customers(&records), vec!["Carlos Vega", "Ana Ruiz"]);
        assert_eq!(records.iter().map(|r| r.line).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_email_skips_assigned_name() {
        let resolver = EntityResolver::new();
        let mut assigned = AssignedNames::new();

        let records = resolver.resolve(
            &[
                line(1, &["John Smith"], None),
                line(2, &["John Smith", "Jane Doe"], Some("john.smith@example.com")),
            ],
            &mut assigned,
        );

        assert_eq!(customers(&records), vec!["John Smith", "Jane Doe"]);
        assert_eq!(records[1].resolution, Resolution::Positional);
    }

    #[test]
    fn test_repeated_signature_goes_to_second_name() {
        let resolver = EntityResolver::new();
        let mut assigned = AssignedNames::new();

        let records = resolver.resolve(
            &[
                line(1, &["Jane Doe", "John Smith"], Some("jane_doe@mail.com")),
                line(2, &["Jane Doe", "Luis Gomez"], None),
            ],
            &mut assigned,
        );

        assert_eq!(customers(&records), vec!["Jane Doe", "Luis Gomez"]);
    }

    #[test]
    fn test_caller_state_is_threaded() {
        let resolver = EntityResolver::new();
        let mut assigned = AssignedNames::new();
        assigned.insert("Ana Ruiz");

        let records = resolver.resolve(&[line(1, &["Ana Ruiz"], None)], &mut assigned);
        assert_eq!(customers(&records), vec!["N/A"]);

        let fresh = resolver.resolve(&[line(1, &["Ana Ruiz"], None)], &mut AssignedNames::new());
        assert_eq!(customers(&fresh), vec!["Ana Ruiz"]);
    }

    #[test]
    fn test_scalar_fields_are_copied() {
        let resolver = EntityResolver::new();
        let mut extraction = line(7, &["Ana Ruiz"], Some("ana@x.com"));
        extraction.product_code = FieldValue::found("500123");
        extraction.phone = FieldValue::found("+57 3001234567");

        let record = resolver
            .resolve_line(&extraction, &mut AssignedNames::new())
            .unwrap();

        assert_eq!(record.line, 7);
        assert_eq!(record.product_code, FieldValue::found("500123"));
        assert_eq!(record.phone, FieldValue::found("+57 3001234567"));
        assert_eq!(record.email, FieldValue::found("ana@x.com"));
        assert!(record.price.is_missing());
        assert!(record.purchase_date.is_missing());
    }

    #[test]
    fn test_names_are_globally_unique() {
        let resolver = EntityResolver::new();
        let mut assigned = AssignedNames::new();
        let pool = ["Ana Ruiz", "Carlos Vega", "Jane Doe", "John Smith"];

        let extractions: Vec<LineExtraction> = (0..40)
            .map(|i| {
                let names: Vec<&str> = (0..(i % 3) + 1).map(|j| pool[(i * 7 + j) % pool.len()]).collect();
                line(i + 1, &names, None)
            })
            .collect();

        let records = resolver.resolve(&extractions, &mut assigned);
        assert_eq!(records.len(), extractions.len());

        let mut seen = HashSet::new();
        for record in records.iter().filter(|r| !r.customer_name.is_missing()) {
            assert!(seen.insert(record.customer_name.as_str()));
        }
        assert_eq!(seen.len(), assigned.len());
        assert_eq!(seen.len(), pool.len());
    }
}
