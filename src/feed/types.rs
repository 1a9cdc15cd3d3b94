use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Normalized internal article used by the engine (transport-agnostic).
/// Never mutated after normalization; every downstream view works over the
/// same collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// `{pubdate}-{batch index}`; unique within one fetch batch only.
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub feed_title: String,
    pub date: DateTime<Utc>,
    pub link: String,
    pub source_type: Option<String>,
    pub sentiment_score: Option<f64>,
    pub sentiment_label: Option<SentimentLabel>,
    pub tickers: Option<Vec<String>>,
}

/// Sentiment classification attached upstream by the feed's enrichment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "bullish",
            SentimentLabel::Bearish => "bearish",
            SentimentLabel::Neutral => "neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bullish" => Some(SentimentLabel::Bullish),
            "bearish" => Some(SentimentLabel::Bearish),
            "neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

/// Articles API response envelope: `{"articles": [...]}`.
#[derive(Debug, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// One raw feed record as the articles API serves it. `author` is part of the
/// wire format but never reaches the internal Article.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct RawArticle {
    pub headline: String,
    pub publisher: String,
    pub feed_title: String,
    /// Publication time in epoch seconds.
    pub pubdate: i64,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    /// Unknown label strings decode to None rather than failing the batch.
    #[serde(default, deserialize_with = "lenient_sentiment")]
    pub sentiment_label: Option<SentimentLabel>,
    #[serde(default)]
    pub tickers: Option<Vec<String>>,
}

fn lenient_sentiment<'de, D>(deserializer: D) -> Result<Option<SentimentLabel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(SentimentLabel::parse))
}
