use super::types::{Article, RawArticle};
use chrono::DateTime;

/// Map one raw feed record to an Article. `index` is the record's position in
/// its fetch batch; since the feed carries no native id, articles are keyed
/// `{pubdate}-{index}`, which is collision-free within a batch but not across
/// fetches. Each fetch replaces the whole collection, so nothing diffs ids
/// across batches.
pub fn normalize_record(raw: RawArticle, index: usize) -> Article {
    Article {
        id: format!("{}-{}", raw.pubdate, index),
        title: raw.headline,
        publisher: raw.publisher,
        feed_title: raw.feed_title,
        date: DateTime::from_timestamp(raw.pubdate, 0).unwrap_or(DateTime::UNIX_EPOCH),
        link: raw.link,
        // An empty source type behaves exactly like an absent one downstream.
        source_type: raw.source_type.filter(|s| !s.is_empty()),
        sentiment_score: raw.sentiment_score,
        sentiment_label: raw.sentiment_label,
        tickers: raw.tickers,
    }
}

/// Normalize a whole fetch batch, preserving feed order. Pure mapping: absent
/// optional fields stay unset, never an error.
pub fn normalize(batch: Vec<RawArticle>) -> Vec<Article> {
    batch
        .into_iter()
        .enumerate()
        .map(|(index, raw)| normalize_record(raw, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::SentimentLabel;

    fn raw(headline: &str, pubdate: i64) -> RawArticle {
        RawArticle {
            headline: headline.to_string(),
            publisher: "Reuters".to_string(),
            feed_title: "Markets".to_string(),
            pubdate,
            link: "https://example.com".to_string(),
            source_type: None,
            author: None,
            sentiment_score: None,
            sentiment_label: None,
            tickers: None,
        }
    }

    #[test]
    fn test_id_combines_pubdate_and_position() {
        let articles = normalize(vec![raw("a", 1700000000), raw("b", 1700000500)]);
        assert_eq!(articles[0].id, "1700000000-0");
        assert_eq!(articles[1].id, "1700000500-1");
    }

    #[test]
    fn test_ids_distinct_for_same_pubdate_in_one_batch() {
        let articles = normalize(vec![raw("a", 1700000000), raw("b", 1700000000)]);
        assert_ne!(articles[0].id, articles[1].id);
    }

    #[test]
    fn test_date_from_epoch_seconds() {
        let articles = normalize(vec![raw("a", 1700000000)]);
        assert_eq!(articles[0].date.timestamp(), 1700000000);
        assert_eq!(articles[0].date.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_optional_fields_pass_through_unset() {
        let articles = normalize(vec![raw("a", 1)]);
        let a = &articles[0];
        assert!(a.source_type.is_none());
        assert!(a.sentiment_score.is_none());
        assert!(a.sentiment_label.is_none());
        assert!(a.tickers.is_none());
    }

    #[test]
    fn test_optional_fields_pass_through_set() {
        let mut record = raw("a", 1);
        record.source_type = Some("forum post".to_string());
        record.sentiment_score = Some(-0.4);
        record.sentiment_label = Some(SentimentLabel::Bearish);
        record.tickers = Some(vec!["AMC".to_string(), "GME".to_string()]);

        let a = normalize_record(record, 0);
        assert_eq!(a.source_type.as_deref(), Some("forum post"));
        assert_eq!(a.sentiment_score, Some(-0.4));
        assert_eq!(a.sentiment_label, Some(SentimentLabel::Bearish));
        assert_eq!(a.tickers.as_ref().map(|t| t.len()), Some(2));
    }

    #[test]
    fn test_empty_source_type_treated_as_absent() {
        let mut record = raw("a", 1);
        record.source_type = Some(String::new());
        assert!(normalize_record(record, 0).source_type.is_none());
    }

    #[test]
    fn test_headline_becomes_title() {
        let a = normalize_record(raw("Fed holds rates", 1), 0);
        assert_eq!(a.title, "Fed holds rates");
        assert_eq!(a.publisher, "Reuters");
        assert_eq!(a.feed_title, "Markets");
    }

    #[test]
    fn test_empty_batch() {
        assert!(normalize(Vec::new()).is_empty());
    }
}
