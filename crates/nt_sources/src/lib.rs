use nt_core::{ArticleSource, Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub mod backends;

pub use backends::*;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Simulated latency of the mock feed.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1000);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Mock,
    Http,
    File,
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" | "memory" => Ok(SourceKind::Mock),
            "http" | "remote" => Ok(SourceKind::Http),
            "file" | "files" => Ok(SourceKind::File),
            other => Err(Error::Config(format!("Unknown article source: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub delay: Duration,
    pub timeout: Duration,
    /// A `.txt` article or a directory of them, for `SourceKind::File`.
    pub path: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delay: DEFAULT_MOCK_DELAY,
            timeout: DEFAULT_TIMEOUT,
            path: None,
        }
    }
}

impl SourceConfig {
    pub fn with_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

pub fn create_source(kind: SourceKind, config: &SourceConfig) -> Result<Arc<dyn ArticleSource>> {
    let source: Arc<dyn ArticleSource> = match kind {
        SourceKind::Mock => Arc::new(MockArticleSource::new(mock_articles()).with_delay(config.delay)),
        SourceKind::Http => Arc::new(HttpArticleSource::new(&config.base_url, config.timeout)?),
        SourceKind::File => {
            let path = config
                .path
                .clone()
                .ok_or_else(|| Error::Config("The file source needs a path".to_string()))?;
            if path.is_dir() {
                Arc::new(FileArticleSource::from_dir(path))
            } else {
                Arc::new(FileArticleSource::from_files(vec![path]))
            }
        }
    };
    tracing::debug!("Created article source {}", source.name());
    Ok(source)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_source, SourceConfig, SourceKind};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_kind() {
        assert_eq!("mock".parse::<SourceKind>().unwrap(), SourceKind::Mock);
        assert_eq!(" HTTP ".parse::<SourceKind>().unwrap(), SourceKind::Http);
        assert_eq!("file".parse::<SourceKind>().unwrap(), SourceKind::File);
        assert!("qdrant".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_file_source_needs_path() {
        let config = SourceConfig::default();
        assert!(matches!(create_source(SourceKind::File, &config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_create_file_source_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mars_space_journal.txt"), "Rover news.").unwrap();

        let config = SourceConfig::default().with_path(dir.path());
        let source = create_source(SourceKind::File, &config).unwrap();
        assert_eq!(source.name(), "file");
        let articles = source.fetch_articles().await.unwrap();
        assert_eq!(articles[0].source, "Space Journal");
    }

    #[test]
    fn test_create_http_source_rejects_bad_url() {
        let config = SourceConfig::default().with_url("not a url");
        assert!(create_source(SourceKind::Http, &config).is_err());
    }

    #[tokio::test]
    async fn test_create_mock_source() {
        let config = SourceConfig::default().with_delay(Duration::ZERO);
        let source = create_source(SourceKind::Mock, &config).unwrap();
        assert_eq!(source.name(), "mock");
        assert_eq!(source.fetch_articles().await.unwrap().len(), 3);
    }
}
