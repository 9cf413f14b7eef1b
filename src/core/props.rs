//! Prop name normalization.
//!
//! Turns the raw text between the braces of a destructuring parameter
//! (e.g. `name, age = 3, onClick?: () => void`) into a canonical
//! ordered list of bare prop names.

/// Normalize a raw destructuring blob into an ordered prop list.
///
/// Splits on commas without balancing nested braces or parens — a
/// default value or type annotation containing a comma will mis-split.
/// That is an accepted limit of the text-pattern approach, not a bug.
/// Duplicate names are preserved in source order.
pub fn normalize_props(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_segment)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Strip default value (`=`), type annotation (`:`) and optional
/// marker (`?`) decoration from one destructuring element.
fn normalize_segment(segment: &str) -> String {
    let before_default = segment.split('=').next().unwrap_or("");
    let before_type = before_default.split(':').next().unwrap_or("");
    let trimmed = before_type.trim();
    trimmed.strip_suffix('?').unwrap_or(trimmed).trim().to_string()
}

/// Union a definition's prop list with props observed at a usage site.
///
/// Existing props keep their exact order (duplicates included); props
/// not already present are appended in first-observed order.
pub fn union_props(existing: &[String], observed: &[String]) -> Vec<String> {
    let mut union: Vec<String> = existing.to_vec();
    for prop in observed {
        if !existing.contains(prop) && !union[existing.len()..].contains(prop) {
            union.push(prop.clone());
        }
    }
    union
}

/// Join a prop list back into destructuring-parameter text.
pub fn join_props(props: &[String]) -> String {
    props.join(", ")
}
