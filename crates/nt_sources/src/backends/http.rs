use async_trait::async_trait;
use nt_core::{Article, ArticleSource, Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Body of `GET /api/articles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

pub struct HttpArticleSource {
    client: Arc<Client>,
    endpoint: Url,
}

impl HttpArticleSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!("Unsupported scheme: {}", base.scheme())));
        }
        let endpoint = Url::parse(&format!("{}/api/articles", base.as_str().trim_end_matches('/')))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for HttpArticleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpArticleSource")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        tracing::debug!("Fetching articles from {}", self.endpoint);
        let response = self.client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", self.endpoint, status)));
        }

        let body = response
            .json::<ArticlesResponse>()
            .await
            .map_err(|e| Error::Fetch(format!("invalid article payload: {}", e)))?;
        tracing::debug!("Received {} articles", body.articles.len());
        Ok(body.articles)
    }
}
