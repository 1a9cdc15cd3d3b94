use crate::feed::types::Article;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The four filterable facets of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Publisher,
    Feed,
    SourceType,
    Sentiment,
}

impl Facet {
    pub fn title(&self) -> &'static str {
        match self {
            Facet::Publisher => "Publishers",
            Facet::Feed => "Feeds",
            Facet::SourceType => "Source Type",
            Facet::Sentiment => "Sentiment",
        }
    }
}

/// Selectable values per facet, derived from the full article collection.
/// Publisher, feed, and source-type lists are distinct present values sorted
/// ascending; sentiments keep first-seen order (small fixed domain, encounter
/// order reads better than alphabetical).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetOptions {
    pub publishers: Vec<String>,
    pub feed_titles: Vec<String>,
    pub source_types: Vec<String>,
    pub sentiments: Vec<String>,
}

impl FacetOptions {
    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Publisher => &self.publishers,
            Facet::Feed => &self.feed_titles,
            Facet::SourceType => &self.source_types,
            Facet::Sentiment => &self.sentiments,
        }
    }
}

/// Active filter values per facet. An empty set means the facet is inactive
/// and every article passes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetSelections {
    pub publishers: BTreeSet<String>,
    pub feeds: BTreeSet<String>,
    pub source_types: BTreeSet<String>,
    pub sentiments: BTreeSet<String>,
}

impl FacetSelections {
    pub fn set(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Publisher => &self.publishers,
            Facet::Feed => &self.feeds,
            Facet::SourceType => &self.source_types,
            Facet::Sentiment => &self.sentiments,
        }
    }

    fn set_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Publisher => &mut self.publishers,
            Facet::Feed => &mut self.feeds,
            Facet::SourceType => &mut self.source_types,
            Facet::Sentiment => &mut self.sentiments,
        }
    }

    /// Add the value if absent, remove it if present. The only mutation apart
    /// from `clear_all`.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let set = self.set_mut(facet);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// Empty every facet's set at once.
    pub fn clear_all(&mut self) {
        self.publishers.clear();
        self.feeds.clear();
        self.source_types.clear();
        self.sentiments.clear();
    }

    /// Total selected values across all facets.
    pub fn active_count(&self) -> usize {
        self.publishers.len() + self.feeds.len() + self.source_types.len() + self.sentiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// Derive the option list for each facet from the full (unfiltered)
/// collection. Independent of current selections: a selected value that has
/// dropped out of the collection disappears from the options but stays
/// selected, matching nothing until it reappears.
pub fn extract_facets(articles: &[Article]) -> FacetOptions {
    let mut publishers = BTreeSet::new();
    let mut feed_titles = BTreeSet::new();
    let mut source_types = BTreeSet::new();
    let mut sentiments: Vec<String> = Vec::new();

    for article in articles {
        if !article.publisher.is_empty() {
            publishers.insert(article.publisher.clone());
        }
        if !article.feed_title.is_empty() {
            feed_titles.insert(article.feed_title.clone());
        }
        if let Some(source_type) = &article.source_type {
            if !source_type.is_empty() {
                source_types.insert(source_type.clone());
            }
        }
        if let Some(label) = article.sentiment_label {
            if !sentiments.iter().any(|s| s == label.as_str()) {
                sentiments.push(label.as_str().to_string());
            }
        }
    }

    FacetOptions {
        publishers: publishers.into_iter().collect(),
        feed_titles: feed_titles.into_iter().collect(),
        source_types: source_types.into_iter().collect(),
        sentiments,
    }
}
