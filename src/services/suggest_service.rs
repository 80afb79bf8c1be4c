//! Autocomplete suggestions over the curated/catalog title union.

use indexmap::IndexSet;

use crate::state::puzzle::Catalog;

/// Suggestions returned when the client does not ask for a specific limit.
pub const DEFAULT_LIMIT: usize = 10;

/// Typed prefixes must be longer than this many characters to activate
/// suggestions.
const MIN_PREFIX_CHARS: usize = 1;

/// Build the suggestion index: curated titles first, then catalog titles,
/// deduplicated with first occurrence winning.
pub fn build_index(curated: &[String], catalog: &Catalog) -> Vec<String> {
    let mut titles: IndexSet<String> = IndexSet::with_capacity(curated.len() + catalog.len());
    for title in curated {
        titles.insert(title.clone());
    }
    for puzzle in catalog.puzzles() {
        titles.insert(puzzle.title.clone());
    }
    titles.into_iter().collect()
}

/// Suggest titles containing `prefix` anywhere, case-insensitively, in index
/// order, truncated to `limit`. Inactive (empty result) until the typed text
/// is at least two characters long.
pub fn suggest(index: &[String], prefix: &str, limit: usize) -> Vec<String> {
    if prefix.chars().count() <= MIN_PREFIX_CHARS {
        return Vec::new();
    }

    let needle = prefix.to_lowercase();
    index
        .iter()
        .filter(|title| title.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}
