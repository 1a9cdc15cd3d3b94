use super::facets::FacetSelections;
use crate::feed::types::Article;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort order for the visible list. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Date,
    Publisher,
    FeedTitle,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Date
    }
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Publisher => "publisher",
            SortKey::FeedTitle => "feed",
        }
    }

    pub fn next(&self) -> SortKey {
        match self {
            SortKey::Date => SortKey::Publisher,
            SortKey::Publisher => SortKey::FeedTitle,
            SortKey::FeedTitle => SortKey::Date,
        }
    }
}

/// Apply search, then facet filters, then sort, in that fixed order.
/// Pure and deterministic: the input slice is never touched, the result is a
/// fresh vector. Empty input gives empty output; empty query and selections
/// give the whole collection in sorted order.
pub fn query(
    articles: &[Article],
    search: &str,
    selections: &FacetSelections,
    sort: SortKey,
) -> Vec<Article> {
    let needle = search.trim().to_lowercase();

    let mut out: Vec<Article> = articles
        .iter()
        .filter(|a| needle.is_empty() || matches_search(a, &needle))
        .filter(|a| matches_selections(a, selections))
        .cloned()
        .collect();

    // Vec::sort_by is stable, so equal keys keep the filtered order.
    match sort {
        SortKey::Date => out.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Publisher => out.sort_by(|a, b| lexical_cmp(&a.publisher, &b.publisher)),
        SortKey::FeedTitle => out.sort_by(|a, b| lexical_cmp(&a.feed_title, &b.feed_title)),
    }

    out
}

/// Case-insensitive substring match over title, publisher, and feed title.
/// `needle` must already be trimmed and lowercased.
fn matches_search(article: &Article, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle)
        || article.publisher.to_lowercase().contains(needle)
        || article.feed_title.to_lowercase().contains(needle)
}

/// AND across facets, OR within a facet. An active facet never matches an
/// article whose corresponding field is unset.
fn matches_selections(article: &Article, selections: &FacetSelections) -> bool {
    if !selections.publishers.is_empty() && !selections.publishers.contains(&article.publisher) {
        return false;
    }
    if !selections.feeds.is_empty() && !selections.feeds.contains(&article.feed_title) {
        return false;
    }
    if !selections.source_types.is_empty() {
        match &article.source_type {
            Some(source_type) if selections.source_types.contains(source_type) => {}
            _ => return false,
        }
    }
    if !selections.sentiments.is_empty() {
        match article.sentiment_label {
            Some(label) if selections.sentiments.contains(label.as_str()) => {}
            _ => return false,
        }
    }
    true
}

/// Case-insensitive ordering with a byte-order tiebreak so the order stays
/// total and deterministic. Stands in for locale collation, which the feed's
/// publisher/feed names never need.
fn lexical_cmp(a: &str, b: &str) -> Ordering {
    match a.to_lowercase().cmp(&b.to_lowercase()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}
