//! Lexical scanners for component definitions and JSX usage tags.
//!
//! Structural inference is done with text patterns alone — no AST and
//! no type information. The matching strategy lives entirely behind
//! `extract_definitions` / `extract_usages` so it can be swapped
//! without touching the sync protocols.

use regex::Regex;
use serde::Serialize;
use std::ops::Range;

use crate::props;

/// A component definition recovered from source text.
///
/// Ephemeral — recomputed on every scan, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentDefinition {
    pub name: String,
    /// Normalized prop names in declaration order, duplicates kept.
    pub props: Vec<String>,
    /// Byte range of the raw text between the destructuring braces.
    pub params_span: Range<usize>,
}

/// One physical JSX opening tag.
#[derive(Debug, Clone, Serialize)]
pub struct UsageSite {
    pub component: String,
    /// Attribute names present on the tag, in source order.
    pub props: Vec<String>,
    /// Byte offset immediately before the tag's `>` or `/>`.
    pub insert_offset: usize,
}

/// Recognized definition shapes, optionally export-qualified:
/// `function Name({ ... })` and `const|let Name = ({ ... }) =>`.
/// The props blob is the first-level non-nested `{...}` after `(`.
const DEFINITION_PATTERN: &str = r"(?:export\s+(?:default\s+)?)?(?:\bfunction\s+([A-Z][A-Za-z0-9_]*)\s*\(\s*\{([^{}]*)\}|\b(?:const|let)\s+([A-Z][A-Za-z0-9_]*)\s*=\s*\(\s*\{([^{}]*)\}\s*\)\s*=>)";

/// A JSX opening tag: `<Name` then a lazy attribute region that cannot
/// cross `>`, then an optional `/` and the closing `>`. Attribute
/// values containing `>` cut the region short — accepted approximation.
const USAGE_PATTERN: &str = r"<([A-Z][A-Za-z0-9_]*)([^>]*?)(/?)>";

/// `identifier =` inside an attribute region declares a prop. Spread
/// attributes contain no `=` directly after an identifier and are not
/// counted.
const ATTRIBUTE_PATTERN: &str = r"([A-Za-z_][A-Za-z0-9_]*)\s*=";

/// Scan a document for component definitions, in first-match order.
///
/// Components whose parameter is not an object-destructuring pattern
/// are not recognized; a definition with empty braces is returned with
/// zero props (the engine skips it for synchronization).
pub fn extract_definitions(text: &str) -> Vec<ComponentDefinition> {
    let Ok(re) = Regex::new(DEFINITION_PATTERN) else {
        return Vec::new();
    };

    let mut definitions = Vec::new();
    for caps in re.captures_iter(text) {
        let (name, blob) = if let (Some(name), Some(blob)) = (caps.get(1), caps.get(2)) {
            (name, blob)
        } else if let (Some(name), Some(blob)) = (caps.get(3), caps.get(4)) {
            (name, blob)
        } else {
            continue;
        };

        definitions.push(ComponentDefinition {
            name: name.as_str().to_string(),
            props: props::normalize_props(blob.as_str()),
            params_span: blob.start()..blob.end(),
        });
    }

    definitions
}

/// Scan a document for JSX usage tags.
///
/// Tags with zero detected attributes carry no synchronization signal
/// and are dropped.
pub fn extract_usages(text: &str) -> Vec<UsageSite> {
    let Ok(tag_re) = Regex::new(USAGE_PATTERN) else {
        return Vec::new();
    };
    let Ok(attr_re) = Regex::new(ATTRIBUTE_PATTERN) else {
        return Vec::new();
    };

    let mut usages = Vec::new();
    for caps in tag_re.captures_iter(text) {
        let name = match caps.get(1) {
            Some(m) => m.as_str().to_string(),
            None => continue,
        };
        let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let props: Vec<String> = attr_re
            .captures_iter(attrs)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect();
        if props.is_empty() {
            continue;
        }

        let Some(whole) = caps.get(0) else { continue };
        let insert_offset = match caps.get(3) {
            Some(slash) if !slash.as_str().is_empty() => slash.start(),
            _ => whole.end() - 1,
        };

        usages.push(UsageSite {
            component: name,
            props,
            insert_offset,
        });
    }

    usages
}

/// Usage sites for one component, reusing the generic scanner so the
/// zero-attribute rule applies uniformly.
pub fn find_usages(text: &str, name: &str) -> Vec<UsageSite> {
    extract_usages(text)
        .into_iter()
        .filter(|usage| usage.component == name)
        .collect()
}

/// Search a document for one component's definition.
///
/// The function-declaration pattern is tried before the arrow pattern;
/// the first match wins. Returns the normalized props and the byte
/// range of the destructuring interior.
pub fn find_definition_in(text: &str, name: &str) -> Option<(Vec<String>, Range<usize>)> {
    let escaped = regex::escape(name);

    let function_pattern = format!(
        r"(?:export\s+(?:default\s+)?)?\bfunction\s+{}\s*\(\s*\{{([^{{}}]*)\}}",
        escaped
    );
    let arrow_pattern = format!(
        r"(?:export\s+(?:default\s+)?)?\b(?:const|let)\s+{}\s*=\s*\(\s*\{{([^{{}}]*)\}}\s*\)\s*=>",
        escaped
    );

    for pattern in [function_pattern, arrow_pattern] {
        let re = Regex::new(&pattern).ok()?;
        if let Some(caps) = re.captures(text) {
            if let Some(blob) = caps.get(1) {
                return Some((
                    props::normalize_props(blob.as_str()),
                    blob.start()..blob.end(),
                ));
            }
        }
    }

    None
}
