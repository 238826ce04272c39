//! Matches free-text title suggestions against the catalog.
//!
//! Suggestions come from a text generator and are untrusted: they are split on
//! commas, trimmed and lower-cased, then compared for exact equality with the
//! equally normalized catalog titles. Anything that does not line up with a
//! catalog title is ignored.

use std::collections::HashSet;

use crate::models::CatalogEntry;

/// Normalizes a single title for comparison
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Splits a comma separated list into its normalized, non-empty fragments
pub fn normalize_fragments(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(normalize_title)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Returns the catalog entries whose title exactly matches one of the suggested fragments.
///
/// Output follows catalog order, not suggestion order, and holds each id at most once.
pub fn match_titles<'a>(suggestions: &str, catalog: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
    let fragments = normalize_fragments(suggestions);
    if fragments.is_empty() {
        return Vec::new();
    }

    let mut seen_ids = HashSet::new();
    catalog
        .iter()
        .filter(|entry| fragments.contains(&normalize_title(&entry.title)))
        .filter(|entry| seen_ids.insert(entry.id.clone()))
        .collect()
}
