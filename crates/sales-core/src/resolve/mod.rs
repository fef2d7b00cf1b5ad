//! Entity resolution: one customer per line, no name reused within a run.

mod assigned;
mod resolver;

pub use assigned::AssignedNames;
pub use resolver::EntityResolver;

/// Comparison key for names and email local parts.
///
/// Drops whitespace and the `.`, `_`, `-` separators, then lower-cases, so
/// `john.smith` and `John Smith` share the key `johnsmith`.
pub fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
