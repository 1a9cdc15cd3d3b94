use crate::feed::types::Article;
use std::collections::HashSet;

/// Source type the feed uses for scraped forum/discussion posts.
const FORUM_SOURCE_TYPE: &str = "forum post";

/// Header stats over the full (unfiltered) collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub forum_posts: usize,
    pub publishers: usize,
    pub feeds: usize,
}

pub fn collection_stats(articles: &[Article]) -> CollectionStats {
    let mut publishers = HashSet::new();
    let mut feeds = HashSet::new();
    let mut forum_posts = 0;

    for article in articles {
        publishers.insert(article.publisher.as_str());
        feeds.insert(article.feed_title.as_str());
        if article.source_type.as_deref() == Some(FORUM_SOURCE_TYPE) {
            forum_posts += 1;
        }
    }

    CollectionStats {
        total: articles.len(),
        forum_posts,
        publishers: publishers.len(),
        feeds: feeds.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn article(publisher: &str, feed: &str, source_type: &str) -> Article {
        Article {
            id: "0-0".to_string(),
            title: "t".to_string(),
            publisher: publisher.to_string(),
            feed_title: feed.to_string(),
            date: DateTime::UNIX_EPOCH,
            link: String::new(),
            source_type: (!source_type.is_empty()).then(|| source_type.to_string()),
            sentiment_score: None,
            sentiment_label: None,
            tickers: None,
        }
    }

    #[test]
    fn test_counts_distinct_publishers_and_feeds() {
        let articles = vec![
            article("Reuters", "Markets", "news article"),
            article("Reuters", "Wire", "forum post"),
            article("AP", "Wire", "forum post"),
        ];
        let stats = collection_stats(&articles);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.publishers, 2);
        assert_eq!(stats.feeds, 2);
        assert_eq!(stats.forum_posts, 2);
    }

    #[test]
    fn test_missing_source_type_is_not_a_forum_post() {
        let articles = vec![article("AP", "Wire", "")];
        assert_eq!(collection_stats(&articles).forum_posts, 0);
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(collection_stats(&[]), CollectionStats::default());
    }
}
