use crate::detail::ArticleDetail;
use crate::filter::{filter_articles, normalize_query};
use crate::ReaderConfig;
use nt_core::{Article, ArticleSource, InferenceModel, Notification, Notifier, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderState {
    pub articles: Vec<Article>,
    pub filtered_articles: Vec<Article>,
    pub search_text: String,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub selected_article: Option<Article>,
    pub is_detail_open: bool,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            filtered_articles: Vec::new(),
            search_text: String::new(),
            // first paint shows the loading placeholder
            is_loading: true,
            is_refreshing: false,
            selected_article: None,
            is_detail_open: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Load,
    Refresh,
}

/// Handle for one in-flight fetch, returned by `begin_load`/`begin_refresh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub phase: FetchPhase,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was replaced with this many articles.
    Committed(usize),
    /// The source failed; the previous collection is kept.
    Failed,
    /// A newer fetch was started; this result was ignored.
    Stale,
}

pub struct ArticleListController {
    state: ReaderState,
    source: Arc<dyn ArticleSource>,
    model: Arc<dyn InferenceModel>,
    notifier: Arc<dyn Notifier>,
    config: ReaderConfig,
    detail: Option<ArticleDetail>,
    generation: u64,
    latest_load: Option<u64>,
    latest_refresh: Option<u64>,
    notified_query: Option<String>,
}

impl ArticleListController {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        model: Arc<dyn InferenceModel>,
        notifier: Arc<dyn Notifier>,
        config: ReaderConfig,
    ) -> Self {
        Self {
            state: ReaderState::default(),
            source,
            model,
            notifier,
            config,
            detail: None,
            generation: 0,
            latest_load: None,
            latest_refresh: None,
            notified_query: None,
        }
    }

    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    pub fn articles(&self) -> &[Article] {
        &self.state.articles
    }

    pub fn filtered_articles(&self) -> &[Article] {
        &self.state.filtered_articles
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.is_refreshing
    }

    pub fn source(&self) -> Arc<dyn ArticleSource> {
        Arc::clone(&self.source)
    }

    /// Initial fetch. Never fails; errors are reported to the notifier.
    pub async fn load(&mut self) -> FetchOutcome {
        let ticket = self.begin_load();
        let result = self.source.fetch_articles().await;
        self.finish_fetch(ticket, result)
    }

    /// User-triggered reload; same as `load` but drives `is_refreshing`.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.begin_refresh();
        let result = self.source.fetch_articles().await;
        self.finish_fetch(ticket, result)
    }

    pub fn begin_load(&mut self) -> FetchTicket {
        self.begin(FetchPhase::Load)
    }

    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.begin(FetchPhase::Refresh)
    }

    fn begin(&mut self, phase: FetchPhase) -> FetchTicket {
        self.generation += 1;
        let generation = self.generation;
        match phase {
            FetchPhase::Load => {
                self.state.is_loading = true;
                self.latest_load = Some(generation);
            }
            FetchPhase::Refresh => {
                self.state.is_refreshing = true;
                self.latest_refresh = Some(generation);
            }
        }
        info!("📰 Fetching articles from {} ({:?} #{})", self.source.name(), phase, generation);
        FetchTicket { phase, generation }
    }

    /// Commit the result of a fetch started with `begin_load`/`begin_refresh`.
    ///
    /// Only the newest ticket may replace the collection. The phase flag is
    /// cleared once the newest ticket of that phase has finished.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Article>>) -> FetchOutcome {
        match ticket.phase {
            FetchPhase::Load if self.latest_load == Some(ticket.generation) => {
                self.state.is_loading = false;
                self.latest_load = None;
            }
            FetchPhase::Refresh if self.latest_refresh == Some(ticket.generation) => {
                self.state.is_refreshing = false;
                self.latest_refresh = None;
            }
            _ => {}
        }

        if ticket.generation != self.generation {
            debug!("Discarding stale fetch #{} (latest is #{})", ticket.generation, self.generation);
            return FetchOutcome::Stale;
        }

        match result {
            Ok(articles) => {
                let count = articles.len();
                self.state.articles = articles;
                self.state.filtered_articles = filter_articles(&self.state.articles, &self.state.search_text);
                info!("✨ Loaded {} articles ({} shown)", count, self.state.filtered_articles.len());
                FetchOutcome::Committed(count)
            }
            Err(e) => {
                error!("Failed to fetch articles from {}: {}", self.source.name(), e);
                self.notifier.notify(Notification::error("Error", "Failed to fetch news articles"));
                FetchOutcome::Failed
            }
        }
    }

    /// Recompute the filtered view from the full collection.
    pub fn search(&mut self, query: &str) -> &[Article] {
        self.state.search_text = query.to_string();
        self.state.filtered_articles = filter_articles(&self.state.articles, query);
        debug!("🔍 Search {:?} matched {} of {} articles", query, self.state.filtered_articles.len(), self.state.articles.len());

        match normalize_query(query) {
            Some(needle) if self.state.filtered_articles.is_empty() => {
                if self.notified_query.as_deref() != Some(needle.as_str()) {
                    self.notifier.notify(Notification::info(
                        "No results found",
                        format!("No articles match \"{}\"", query),
                    ));
                    self.notified_query = Some(needle);
                }
            }
            _ => self.notified_query = None,
        }

        &self.state.filtered_articles
    }

    pub fn clear_search(&mut self) -> &[Article] {
        self.search("")
    }

    pub fn select_article(&mut self, article: Article) -> &mut ArticleDetail {
        info!("📖 Opening article: {}", article.title);
        self.state.selected_article = Some(article.clone());
        self.state.is_detail_open = true;
        self.detail.insert(ArticleDetail::open(
            article,
            Arc::clone(&self.model),
            Arc::clone(&self.notifier),
            self.config.target_locale.clone(),
        ))
    }

    /// Select by id from the full collection; `false` if no such article.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        match self.state.articles.iter().find(|a| a.id == id).cloned() {
            Some(article) => {
                self.select_article(article);
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.state.is_detail_open = false;
        self.state.selected_article = None;
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&ArticleDetail> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut ArticleDetail> {
        self.detail.as_mut()
    }
}
