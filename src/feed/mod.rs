pub mod articles_api;
pub mod normalize;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use types::RawArticle;

/// A source of raw article records. `limit` bounds the batch size. Failure
/// surfaces as one opaque error; retry policy (if any) belongs to the caller,
/// never to the source.
#[async_trait]
pub trait ArticleFeed: Send + Sync {
    async fn fetch_articles(&self, limit: u32) -> Result<Vec<RawArticle>>;
}
