use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns a short name for logging
    fn name(&self) -> &str;

    /// Fetch all current articles, in feed order.
    ///
    /// Implementations report every failure as `Error::Fetch`.
    async fn fetch_articles(&self) -> Result<Vec<Article>>;
}
