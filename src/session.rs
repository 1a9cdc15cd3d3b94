use crate::engine::{self, CollectionStats, Facet, FacetOptions, FacetSelections, SortKey};
use crate::feed::types::Article;
use crate::prefs::{PersistedPreferences, PrefsStore};
use chrono::{DateTime, Utc};

/// Lifecycle of the most recent fetch attempt. A successful fetch with zero
/// articles is `Ready { count: 0 }`, which is not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    Loading,
    Ready {
        fetched_at: DateTime<Utc>,
        count: usize,
    },
    Failed(String),
}

/// One interactive query session: the immutable article collection, the facet
/// options and stats derived from it, and the user's search/filter/sort
/// state.
///
/// Every mutation goes through a method, which is what enforces the
/// persistence rule: selection and sort changes are saved immediately, search
/// edits never are. The visible list is derived on demand, not cached.
pub struct Session {
    articles: Vec<Article>,
    facets: FacetOptions,
    stats: CollectionStats,
    search_query: String,
    sort_key: SortKey,
    selections: FacetSelections,
    feed_status: FeedStatus,
    store: PrefsStore,
}

impl Session {
    /// Start a session with selections and sort key restored from the store
    /// (or defaults when nothing usable is stored).
    pub fn new(store: PrefsStore) -> Self {
        let prefs = store.load();
        Self {
            articles: Vec::new(),
            facets: FacetOptions::default(),
            stats: CollectionStats::default(),
            search_query: String::new(),
            sort_key: prefs.sort_key,
            selections: prefs.selections,
            feed_status: FeedStatus::Loading,
            store,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    pub fn stats(&self) -> CollectionStats {
        self.stats
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn selections(&self) -> &FacetSelections {
        &self.selections
    }

    pub fn feed_status(&self) -> &FeedStatus {
        &self.feed_status
    }

    /// The visible list: search, facet filters, then sort, over the current
    /// collection.
    pub fn visible(&self) -> Vec<Article> {
        engine::query(&self.articles, &self.search_query, &self.selections, self.sort_key)
    }

    /// Replace the collection after a fetch. Facet options and stats are
    /// re-derived from the new collection; selections are left untouched, so
    /// a selection whose value dropped out of the feed simply matches nothing
    /// until the value reappears.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        self.facets = engine::extract_facets(&articles);
        self.stats = engine::collection_stats(&articles);
        self.feed_status = FeedStatus::Ready {
            fetched_at: Utc::now(),
            count: articles.len(),
        };
        self.articles = articles;
    }

    /// Record a failed fetch. The previous collection (if any) stays visible.
    pub fn set_feed_failed(&mut self, message: String) {
        self.feed_status = FeedStatus::Failed(message);
    }

    pub fn set_feed_loading(&mut self) {
        self.feed_status = FeedStatus::Loading;
    }

    pub fn toggle_facet(&mut self, facet: Facet, value: &str) {
        self.selections.toggle(facet, value);
        self.persist();
    }

    /// Empty all four facet selections at once. The search query is not
    /// touched.
    pub fn clear_filters(&mut self) {
        if self.selections.is_empty() {
            return;
        }
        self.selections.clear_all();
        self.persist();
    }

    pub fn set_sort(&mut self, sort_key: SortKey) {
        if self.sort_key == sort_key {
            return;
        }
        self.sort_key = sort_key;
        self.persist();
    }

    pub fn cycle_sort(&mut self) {
        self.set_sort(self.sort_key.next());
    }

    /// Search edits are session-local: never persisted.
    pub fn set_search(&mut self, query: String) {
        self.search_query = query;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
    }

    fn persist(&self) {
        self.store.save(&PersistedPreferences {
            selections: self.selections.clone(),
            sort_key: self.sort_key,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::SentimentLabel;
    use chrono::DateTime;

    fn temp_store(tag: &str) -> PrefsStore {
        let path = std::env::temp_dir().join(format!(
            "newsdeck_session_unit_{}_{}.json",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        PrefsStore::new(path)
    }

    fn article(id: &str, publisher: &str, secs: i64, label: Option<SentimentLabel>) -> Article {
        Article {
            id: id.to_string(),
            title: format!("article {}", id),
            publisher: publisher.to_string(),
            feed_title: "Markets".to_string(),
            date: DateTime::from_timestamp(secs, 0).unwrap(),
            link: String::new(),
            source_type: None,
            sentiment_score: None,
            sentiment_label: label,
            tickers: None,
        }
    }

    #[test]
    fn test_set_articles_rederives_facets_and_stats() {
        let mut session = Session::new(temp_store("facets"));
        session.set_articles(vec![
            article("a", "Reuters", 100, Some(SentimentLabel::Bullish)),
            article("b", "AP", 200, None),
        ]);

        assert_eq!(session.facets().publishers, vec!["AP", "Reuters"]);
        assert_eq!(session.facets().sentiments, vec!["bullish"]);
        assert_eq!(session.stats().total, 2);
        assert!(matches!(session.feed_status(), FeedStatus::Ready { count: 2, .. }));
    }

    #[test]
    fn test_stale_selection_survives_collection_swap() {
        let store = temp_store("stale");
        let mut session = Session::new(store);
        session.set_articles(vec![article("a", "Reuters", 100, None)]);
        session.toggle_facet(Facet::Publisher, "Reuters");
        assert_eq!(session.visible().len(), 1);

        // New batch without Reuters: the selection stays but matches nothing.
        session.set_articles(vec![article("b", "AP", 200, None)]);
        assert!(session.selections().publishers.contains("Reuters"));
        assert!(!session.facets().publishers.contains(&"Reuters".to_string()));
        assert!(session.visible().is_empty());

        let _ = std::fs::remove_file(session.store.path());
    }

    #[test]
    fn test_toggle_persists_search_does_not() {
        let store = temp_store("persist_rule");
        let path = store.path().to_path_buf();
        let mut session = Session::new(store);

        session.set_search("moon".to_string());
        session.push_search_char('!');
        assert!(!path.exists(), "search edits must not persist");

        session.toggle_facet(Facet::Sentiment, "bullish");
        assert!(path.exists(), "selection changes must persist");

        let stored = PrefsStore::new(&path).load();
        assert!(stored.selections.sentiments.contains("bullish"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unchanged_sort_does_not_rewrite() {
        let store = temp_store("sort_noop");
        let path = store.path().to_path_buf();
        let mut session = Session::new(store);

        session.set_sort(SortKey::Date);
        assert!(!path.exists(), "setting the default sort again is not a change");

        session.set_sort(SortKey::Publisher);
        assert!(path.exists());
        assert_eq!(PrefsStore::new(&path).load().sort_key, SortKey::Publisher);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_clear_filters_keeps_search() {
        let mut session = Session::new(temp_store("clear"));
        session.set_articles(vec![article("a", "Reuters", 100, Some(SentimentLabel::Bearish))]);
        session.toggle_facet(Facet::Publisher, "Reuters");
        session.toggle_facet(Facet::Sentiment, "bearish");
        session.set_search("rates".to_string());

        session.clear_filters();
        assert!(session.selections().is_empty());
        assert_eq!(session.search_query(), "rates");

        let _ = std::fs::remove_file(session.store.path());
    }

    #[test]
    fn test_failed_fetch_keeps_previous_collection() {
        let mut session = Session::new(temp_store("failed"));
        session.set_articles(vec![article("a", "Reuters", 100, None)]);

        session.set_feed_failed("connection refused".to_string());
        assert_eq!(session.articles().len(), 1);
        assert_eq!(
            session.feed_status(),
            &FeedStatus::Failed("connection refused".to_string())
        );
    }
}
