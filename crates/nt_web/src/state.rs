use nt_core::Article;
use tokio::sync::RwLock;

/// Article collection served by the backend; lives for the process only.
#[derive(Default)]
pub struct AppState {
    pub articles: RwLock<Vec<Article>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles),
        }
    }
}
