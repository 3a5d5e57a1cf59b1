pub mod error;
pub mod models;
pub mod notify;
pub mod podcast;
pub mod source;
pub mod types;

pub use error::Error;
pub use models::InferenceModel;
pub use notify::{Notification, NotificationKind, Notifier};
pub use podcast::{Host, ScriptLine};
pub use source::ArticleSource;
pub use types::{Article, Bias};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::{Article, ArticleSource, Bias, Error, InferenceModel, Notification, NotificationKind, Notifier, Result};
}
