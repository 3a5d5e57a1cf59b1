pub mod controller;
pub mod detail;
pub mod filter;
pub mod logging;
pub mod notify;

pub use controller::{ArticleListController, FetchOutcome, FetchPhase, FetchTicket, ReaderState};
pub use detail::{ArticleDetail, PlaybackRequest, ViewMode};
pub use notify::{ChannelNotifier, LogNotifier, RecordingNotifier};

pub const DEFAULT_TARGET_LOCALE: &str = "es";

#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Locale passed to the model when the translated view is requested.
    pub target_locale: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            target_locale: DEFAULT_TARGET_LOCALE.to_string(),
        }
    }
}

pub mod prelude {
    pub use super::{ArticleDetail, ArticleListController, ReaderConfig, ReaderState, ViewMode};
    pub use nt_core::{Article, Bias, Error, Notification, NotificationKind, Result};
}
