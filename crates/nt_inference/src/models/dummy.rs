use std::fmt;
use nt_core::podcast::EMPTY_SCRIPT;
use nt_core::{Article, Result};
use super::InferenceModel;
use crate::Config;

const SUMMARY_WORDS: usize = 20;

/// Extractive model: no network, derives text from the input itself.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub async fn new(_config: Option<Config>) -> Result<Self> {
        Ok(Self)
    }
}

fn first_words(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().take(SUMMARY_WORDS).collect();
    let mut summary = words.join(" ");
    if text.split_whitespace().nth(SUMMARY_WORDS).is_some() {
        summary.push_str("...");
    }
    summary
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        // Take first 20 words and join them
        Ok(first_words(text))
    }

    async fn translate(&self, text: &str, target_locale: &str) -> Result<String> {
        // Only the first paragraph, tagged with the locale
        let first = text
            .split("\n\n")
            .map(str::trim)
            .find(|p| !p.is_empty())
            .unwrap_or_default();
        Ok(format!("[{}] {}", target_locale, first))
    }

    async fn podcast_script(&self, articles: &[Article]) -> Result<String> {
        if articles.is_empty() {
            return Ok(EMPTY_SCRIPT.to_string());
        }
        let mut lines = vec![
            format!("Host A: Welcome to the news roundup. We have {} stories today.", articles.len()),
            "Host B: Let's get into it.".to_string(),
        ];
        for article in articles {
            let gist = if article.summary.trim().is_empty() {
                first_words(&article.main_text)
            } else {
                article.summary.trim().to_string()
            };
            lines.push(format!("Host A: From {}: {}.", article.source, article.title.trim_end_matches('.')));
            lines.push(format!("Host B: {} The outlet leans {}.", gist, article.bias));
        }
        lines.push("Host A: That's the news for now. Thanks for listening!".to_string());
        Ok(lines.join("\n"))
    }
}
