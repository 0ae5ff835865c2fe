//! Static item filters.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher};
use serde::{Deserialize, Serialize};

/// How static items are matched against the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Case-insensitive substring match, original order preserved.
    #[default]
    Substring,
    /// Fuzzy match ranked by score, best first.
    Fuzzy,
}

impl FilterMode {
    /// Indices of the labels matching `query`, in result order.
    pub fn apply(self, query: &str, labels: &[String]) -> Vec<usize> {
        match self {
            FilterMode::Substring => substring_filter(query, labels),
            FilterMode::Fuzzy => fuzzy_filter(query, labels)
                .into_iter()
                .map(|m| m.index)
                .collect(),
        }
    }
}

/// Case-insensitive substring filter.
///
/// Returns the indices of labels containing `query`, in their original order.
/// An empty query matches everything.
pub fn substring_filter(query: &str, labels: &[String]) -> Vec<usize> {
    let needle = query.to_lowercase();
    labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

/// One fuzzy match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMatch {
    /// Position of the label in the filtered slice.
    pub index: usize,
    /// nucleo score; higher ranks first.
    pub score: u32,
}

/// A label that remembers where it came from.
struct Candidate<'a> {
    index: usize,
    label: &'a str,
}

impl AsRef<str> for Candidate<'_> {
    fn as_ref(&self) -> &str {
        self.label
    }
}

/// Rank labels against `query` with nucleo's fuzzy matcher.
///
/// Matches come back best first, equal scores in slice order. A blank query
/// keeps every label, unranked.
pub fn fuzzy_filter(query: &str, labels: &[String]) -> Vec<FilterMatch> {
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );
    let candidates = labels
        .iter()
        .enumerate()
        .map(|(index, label)| Candidate { index, label });

    pattern
        .match_list(candidates, &mut Matcher::new(Config::DEFAULT))
        .into_iter()
        .map(|(candidate, score)| FilterMatch {
            index: candidate.index,
            score,
        })
        .collect()
}
