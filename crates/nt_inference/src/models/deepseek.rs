use std::fmt;
use std::sync::Arc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use nt_core::podcast::{fallback_script, has_both_hosts, EMPTY_SCRIPT};
use nt_core::{Article, Error, Result};
use super::InferenceModel;

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
const CHAT_MODEL: &str = "deepseek-chat";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

pub struct DeepSeekModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for DeepSeekModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DeepSeekModel {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Inference("DeepSeek API key is required".to_string()))?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url)?;
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_request(prompt: String) -> ChatRequest {
        ChatRequest {
            model: CHAT_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        }
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let request = Self::build_request(prompt);

        let response = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| Error::Inference("DeepSeek returned no choices".to_string()))
    }
}

fn summary_prompt(text: &str) -> String {
    format!("Please summarize the following article:\n\n{}\n\nSummary:", text)
}

fn translation_prompt(text: &str, target_locale: &str) -> String {
    format!(
        "Translate the following article into the language with locale code \"{}\". Reply with the translation only.\n\n{}",
        target_locale, text
    )
}

fn podcast_prompt(articles: &[Article]) -> String {
    let mut prompt = String::from(
        "You write scripts for a news podcast with two hosts. Host A introduces each story and asks questions. \
         Host B analyses it, points out loaded wording and contrasts how the outlets frame it. \
         Every line of dialogue must start with \"Host A:\" or \"Host B:\". \
         Keep it to a few hundred words and end by encouraging listeners to judge for themselves.\n\nArticles:\n",
    );
    for (i, article) in articles.iter().enumerate() {
        prompt.push_str(&format!(
            "\n{}. {} ({}, {} leaning)\n{}\n",
            i + 1,
            article.title,
            article.source,
            article.bias,
            article.summary
        ));
    }
    prompt
}

/// Use the generated script when both hosts speak in it, the canned one otherwise.
fn accept_script(articles: &[Article], generated: String) -> String {
    if has_both_hosts(&generated) {
        generated
    } else {
        tracing::warn!("Generated script does not contain both hosts, using fallback");
        fallback_script(articles)
    }
}

#[async_trait::async_trait]
impl InferenceModel for DeepSeekModel {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        tracing::debug!("Requesting summary of {} chars", text.len());
        self.complete(summary_prompt(text)).await
    }

    async fn translate(&self, text: &str, target_locale: &str) -> Result<String> {
        tracing::debug!("Requesting {} translation of {} chars", target_locale, text.len());
        self.complete(translation_prompt(text, target_locale)).await
    }

    async fn podcast_script(&self, articles: &[Article]) -> Result<String> {
        if articles.is_empty() {
            return Ok(EMPTY_SCRIPT.to_string());
        }
        tracing::debug!("Requesting podcast script for {} articles", articles.len());
        let generated = self.complete(podcast_prompt(articles)).await?;
        Ok(accept_script(articles, generated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_requires_api_key() {
        let result = DeepSeekModel::new(None, None);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "Inference error: DeepSeek API key is required");

        assert!(DeepSeekModel::new(Some("  ".to_string()), None).is_err());
        assert!(DeepSeekModel::new(Some("test-key".to_string()), None).is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let model = DeepSeekModel::new(Some("secret-key".to_string()), Some("http://localhost:1234/".to_string())).unwrap();
        let debug = format!("{:?}", model);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("http://localhost:1234"));
    }

    #[test]
    fn test_request_shape() {
        let request = DeepSeekModel::build_request(translation_prompt("Hola", "fr"));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], CHAT_MODEL);
        assert_eq!(value["messages"][0]["role"], "user");
        assert!(value["messages"][0]["content"].as_str().unwrap().contains("\"fr\""));
    }

    fn article() -> Article {
        Article {
            id: "3".to_string(),
            title: "Mars Discovery".to_string(),
            summary: "Ancient water systems found.".to_string(),
            main_text: "Full text".to_string(),
            source: "Space Journal".to_string(),
            published_at: chrono::Utc::now(),
            url: "https://example.com/3".to_string(),
            authors: vec![],
            image_url: None,
            bias: nt_core::Bias::Center,
        }
    }

    #[test]
    fn test_podcast_prompt_lists_articles() {
        let prompt = podcast_prompt(&[article()]);
        assert!(prompt.contains("\"Host A:\""));
        assert!(prompt.contains("1. Mars Discovery (Space Journal, center leaning)\nAncient water systems found."));
    }

    #[test]
    fn test_one_sided_script_falls_back() {
        let articles = [article()];
        let good = "Host A: Hi.\nHost B: Hello.".to_string();
        assert_eq!(accept_script(&articles, good.clone()), good);

        let script = accept_script(&articles, "Host A: Just me talking.".to_string());
        assert!(script.contains("Mars Discovery was a significant story"));
        assert!(has_both_hosts(&script));
    }

    #[tokio::test]
    async fn test_no_articles_needs_no_request() {
        let model = DeepSeekModel::new(Some("test-key".to_string()), Some("http://127.0.0.1:9".to_string())).unwrap();
        assert_eq!(model.podcast_script(&[]).await.unwrap(), EMPTY_SCRIPT);
    }
}
