use nt_core::podcast::script_lines;
use nt_core::{Article, InferenceModel, Notification, Notifier, ScriptLine};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

pub const SUMMARY_PENDING: &str = "Summary will be generated...";
pub const TRANSLATION_PENDING: &str = "Translation will be generated...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Original,
    Summary,
    Translated,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Original => f.write_str("original"),
            ViewMode::Summary => f.write_str("summary"),
            ViewMode::Translated => f.write_str("translated"),
        }
    }
}

/// What the audio action would play: a two-host script about the open
/// article. No audio is synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackRequest {
    pub article_id: String,
    pub title: String,
    pub script: String,
    pub lines: Vec<ScriptLine>,
}

/// One open article with its view mode and generated text.
///
/// Generated text lives as long as this value; dropping it (closing the
/// detail view) discards the cache.
pub struct ArticleDetail {
    article: Article,
    mode: ViewMode,
    summary: Option<String>,
    translation: Option<String>,
    script: Option<String>,
    target_locale: String,
    model: Arc<dyn InferenceModel>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for ArticleDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleDetail")
            .field("article", &self.article.id)
            .field("mode", &self.mode)
            .field("summary", &self.summary.is_some())
            .field("translation", &self.translation.is_some())
            .field("script", &self.script.is_some())
            .field("model", &self.model.name())
            .finish()
    }
}

impl ArticleDetail {
    pub fn open(
        article: Article,
        model: Arc<dyn InferenceModel>,
        notifier: Arc<dyn Notifier>,
        target_locale: impl Into<String>,
    ) -> Self {
        Self {
            article,
            mode: ViewMode::Original,
            summary: None,
            translation: None,
            script: None,
            target_locale: target_locale.into(),
            model,
            notifier,
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }

    pub fn has_translation(&self) -> bool {
        self.translation.is_some()
    }

    pub fn has_script(&self) -> bool {
        self.script.is_some()
    }

    pub fn current_text(&self) -> &str {
        match self.mode {
            ViewMode::Original => &self.article.main_text,
            ViewMode::Summary => self.summary.as_deref().unwrap_or(SUMMARY_PENDING),
            ViewMode::Translated => self.translation.as_deref().unwrap_or(TRANSLATION_PENDING),
        }
    }

    pub fn show_original(&mut self) -> &str {
        self.mode = ViewMode::Original;
        self.current_text()
    }

    pub async fn show_summary(&mut self) -> &str {
        self.mode = ViewMode::Summary;
        if self.summary.is_none() {
            tracing::info!("🤖 Generating summary for article: {}", self.article.title);
            match self.model.summarize(&self.article.main_text).await {
                Ok(text) => {
                    tracing::info!("✨ Summary generated successfully");
                    self.summary = Some(text);
                }
                Err(e) => {
                    tracing::error!("Failed to summarize article {}: {}", self.article.id, e);
                    self.notifier.notify(Notification::error("Error", "Failed to generate summary"));
                }
            }
        }
        self.current_text()
    }

    pub async fn show_translation(&mut self) -> &str {
        self.mode = ViewMode::Translated;
        if self.translation.is_none() {
            tracing::info!("🌐 Translating article to {}: {}", self.target_locale, self.article.title);
            match self.model.translate(&self.article.main_text, &self.target_locale).await {
                Ok(text) => {
                    tracing::info!("✨ Translation generated successfully");
                    self.translation = Some(text);
                }
                Err(e) => {
                    tracing::error!("Failed to translate article {}: {}", self.article.id, e);
                    self.notifier.notify(Notification::error("Error", "Failed to translate article"));
                }
            }
        }
        self.current_text()
    }

    pub async fn switch_to(&mut self, mode: ViewMode) -> &str {
        match mode {
            ViewMode::Original => self.show_original(),
            ViewMode::Summary => self.show_summary().await,
            ViewMode::Translated => self.show_translation().await,
        }
    }

    /// Podcast script for the open article, generated on first use and
    /// cached like the summary. `None` if generation failed.
    pub async fn listen(&mut self) -> Option<PlaybackRequest> {
        if self.script.is_none() {
            tracing::info!("🎙️ Generating podcast script for article: {}", self.article.title);
            match self.model.podcast_script(std::slice::from_ref(&self.article)).await {
                Ok(script) => self.script = Some(script),
                Err(e) => {
                    tracing::error!("Failed to generate podcast script for article {}: {}", self.article.id, e);
                    self.notifier.notify(Notification::error("Error", "Failed to generate podcast"));
                    return None;
                }
            }
        }
        let script = self.script.clone()?;
        tracing::info!("🔊 Starting audio playback for article: {}", self.article.title);
        Some(PlaybackRequest {
            article_id: self.article.id.clone(),
            title: self.article.title.clone(),
            lines: script_lines(&script),
            script,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use async_trait::async_trait;
    use chrono::Utc;
    use nt_core::{Bias, Error, NotificationKind, Result};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingModel {
        summaries: AtomicUsize,
        translations: AtomicUsize,
        scripts: AtomicUsize,
        failing: AtomicBool,
    }

    #[async_trait]
    impl InferenceModel for CountingModel {
        fn name(&self) -> &str {
            "counting"
        }

        async fn summarize(&self, _text: &str) -> Result<String> {
            self.summaries.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Inference("offline".to_string()));
            }
            Ok("generated summary".to_string())
        }

        async fn translate(&self, _text: &str, target_locale: &str) -> Result<String> {
            self.translations.fetch_add(1, Ordering::SeqCst);
            Ok(format!("translated to {}", target_locale))
        }

        async fn podcast_script(&self, articles: &[Article]) -> Result<String> {
            self.scripts.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Inference("offline".to_string()));
            }
            Ok(format!("Host A: Today, {}.\nHost B: Indeed.", articles[0].title))
        }
    }

    fn article() -> Article {
        Article {
            id: "3".to_string(),
            title: "Space Exploration Milestone: New Discoveries on Mars".to_string(),
            summary: "Latest rover mission uncovers evidence of ancient water systems".to_string(),
            main_text: "NASA's latest Mars rover mission has achieved a groundbreaking discovery.".to_string(),
            source: "Space Journal".to_string(),
            published_at: Utc::now(),
            url: "https://example.com/mars-discovery".to_string(),
            authors: vec!["Dr. James Wright".to_string()],
            image_url: None,
            bias: Bias::Center,
        }
    }

    fn open(model: &Arc<CountingModel>, notifier: &Arc<RecordingNotifier>) -> ArticleDetail {
        ArticleDetail::open(article(), model.clone(), notifier.clone(), "es")
    }

    #[tokio::test]
    async fn test_opens_in_original_mode() {
        let model = Arc::new(CountingModel::default());
        let notifier = Arc::new(RecordingNotifier::new());
        let detail = open(&model, &notifier);
        assert_eq!(detail.mode(), ViewMode::Original);
        assert_eq!(detail.current_text(), article().main_text);
    }

    #[tokio::test]
    async fn test_summary_generated_once() {
        let model = Arc::new(CountingModel::default());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut detail = open(&model, &notifier);

        assert_eq!(detail.show_summary().await, "generated summary");
        assert_eq!(detail.show_original(), article().main_text);
        assert_eq!(detail.show_summary().await, "generated summary");

        assert_eq!(model.summaries.load(Ordering::SeqCst), 1);
        assert_eq!(model.translations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translation_uses_locale_and_caches() {
        let model = Arc::new(CountingModel::default());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut detail = open(&model, &notifier);

        assert_eq!(detail.switch_to(ViewMode::Translated).await, "translated to es");
        detail.switch_to(ViewMode::Summary).await;
        assert_eq!(detail.switch_to(ViewMode::Translated).await, "translated to es");
        assert_eq!(model.translations.load(Ordering::SeqCst), 1);
        assert!(detail.has_summary() && detail.has_translation());
    }

    #[tokio::test]
    async fn test_failed_generation_is_not_cached() {
        let model = Arc::new(CountingModel::default());
        model.failing.store(true, Ordering::SeqCst);
        let notifier = Arc::new(RecordingNotifier::new());
        let mut detail = open(&model, &notifier);

        assert_eq!(detail.show_summary().await, SUMMARY_PENDING);
        assert_eq!(detail.mode(), ViewMode::Summary);
        assert!(!detail.has_summary());
        assert_eq!(notifier.count(NotificationKind::Error), 1);

        model.failing.store(false, Ordering::SeqCst);
        assert_eq!(detail.show_summary().await, "generated summary");
        assert_eq!(model.summaries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_listen_generates_script_once() {
        let model = Arc::new(CountingModel::default());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut detail = open(&model, &notifier);
        assert!(!detail.has_script());

        let request = detail.listen().await.unwrap();
        assert_eq!(request.article_id, "3");
        assert_eq!(request.script, "Host A: Today, Space Exploration Milestone: New Discoveries on Mars.\nHost B: Indeed.");
        assert_eq!(request.lines.len(), 2);
        assert_eq!(request.lines[1].host, nt_core::Host::B);

        assert_eq!(detail.listen().await.unwrap(), request);
        assert_eq!(model.scripts.load(Ordering::SeqCst), 1);
        assert_eq!(detail.mode(), ViewMode::Original);
        assert!(detail.has_script());
    }

    #[tokio::test]
    async fn test_failed_script_is_not_cached() {
        let model = Arc::new(CountingModel::default());
        model.failing.store(true, Ordering::SeqCst);
        let notifier = Arc::new(RecordingNotifier::new());
        let mut detail = open(&model, &notifier);

        assert!(detail.listen().await.is_none());
        assert!(!detail.has_script());
        assert_eq!(notifier.notifications()[0].message, "Failed to generate podcast");

        model.failing.store(false, Ordering::SeqCst);
        assert!(detail.listen().await.is_some());
        assert_eq!(model.scripts.load(Ordering::SeqCst), 2);
    }
}
