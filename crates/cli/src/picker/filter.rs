//! Fuzzy filtering of candidate entries against the live query.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use vexel_dev_core::selection::SelectionEntry;

/// Ranks `pool` against `query` by fuzzy match quality, best first.
///
/// An empty query is the browse state: the pool comes back unchanged, same
/// order, same length. Otherwise entries that do not match are dropped and
/// the rest are sorted by descending score; ties keep their pool order, so
/// catalog order is the stable tie-break.
pub fn filter_entries(query: &str, pool: Vec<SelectionEntry>) -> Vec<SelectionEntry> {
    if query.is_empty() {
        return pool;
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, usize, SelectionEntry)> = pool
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            matcher
                .fuzzy_match(&entry.display_name(), query)
                .map(|score| (score, index, entry))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    scored.into_iter().map(|(_, _, entry)| entry).collect()
}
