use std::fmt;
use nt_core::podcast::EMPTY_SCRIPT;
use nt_core::{Article, Result};
use super::InferenceModel;

pub const SUMMARY_PLACEHOLDER: &str =
    "This is a generated summary of the article. The main points include the key findings and conclusions...";
pub const TRANSLATION_PLACEHOLDER: &str =
    "Esta es una traducción del artículo. El contenido principal incluye...";
pub const PODCAST_PLACEHOLDER: &str = "\
Host A: Welcome to today's news roundup.
Host B: Thanks for having me. There is a lot to unpack in today's stories.
Host A: We'll walk through the headlines and what they mean for you.
Host B: And as always, check more than one source before making up your mind.
Host A: That's all for now. Stay informed!";

/// Stands in for a real generation service: fixed text, never fails.
#[derive(Default)]
pub struct PlaceholderModel;

impl PlaceholderModel {
    pub fn new() -> Self {
        Self
    }
}

impl fmt::Debug for PlaceholderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderModel").finish()
    }
}

#[async_trait::async_trait]
impl InferenceModel for PlaceholderModel {
    fn name(&self) -> &str {
        "Placeholder"
    }

    async fn summarize(&self, _text: &str) -> Result<String> {
        Ok(SUMMARY_PLACEHOLDER.to_string())
    }

    async fn translate(&self, _text: &str, _target_locale: &str) -> Result<String> {
        Ok(TRANSLATION_PLACEHOLDER.to_string())
    }

    async fn podcast_script(&self, articles: &[Article]) -> Result<String> {
        if articles.is_empty() {
            return Ok(EMPTY_SCRIPT.to_string());
        }
        Ok(PODCAST_PLACEHOLDER.to_string())
    }
}
