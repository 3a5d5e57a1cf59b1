use async_trait::async_trait;
use std::fmt;
use crate::{Article, Result};

/// Text generation used by the article detail view.
#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    /// Returns the name of the model
    fn name(&self) -> &str;

    /// Summarize a piece of article text
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Translate a piece of article text into the given locale (e.g. "es")
    async fn translate(&self, text: &str, target_locale: &str) -> Result<String>;

    /// Write a two-host podcast script (`Host A:` / `Host B:` lines) about
    /// the given articles
    async fn podcast_script(&self, articles: &[Article]) -> Result<String>;
}
