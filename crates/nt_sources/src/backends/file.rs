use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nt_core::{Article, ArticleSource, Bias, Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

const DEFAULT_SOURCE_NAME: &str = "Generic Source";

enum Location {
    Dir(PathBuf),
    Files(Vec<PathBuf>),
}

/// Articles read from plain `.txt` files.
///
/// Metadata comes from the file name: `article1_national_voice.txt` becomes
/// the article "Article1 National Voice" from "National Voice". The
/// modification time stands in for the publication date. Files carry no
/// bias label, so every article is `Center`.
pub struct FileArticleSource {
    location: Location,
}

impl FileArticleSource {
    /// Every `*.txt` file directly inside `dir`, in file name order.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::Dir(dir.into()),
        }
    }

    /// Exactly these files, in this order.
    pub fn from_files(paths: Vec<PathBuf>) -> Self {
        Self {
            location: Location::Files(paths),
        }
    }

    async fn paths(&self) -> Result<Vec<PathBuf>> {
        match &self.location {
            Location::Files(paths) => Ok(paths.clone()),
            Location::Dir(dir) => {
                let mut entries = tokio::fs::read_dir(dir).await?;
                let mut paths = Vec::new();
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext == "txt") && entry.file_type().await?.is_file() {
                        paths.push(path);
                    }
                }
                paths.sort();
                Ok(paths)
            }
        }
    }
}

#[async_trait]
impl ArticleSource for FileArticleSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let paths = self.paths().await.map_err(into_fetch)?;
        let mut articles = Vec::with_capacity(paths.len());
        for path in &paths {
            match read_article(path).await.map_err(into_fetch)? {
                Some(article) => articles.push(article),
                None => debug!("Skipping {}: empty or unreadable", path.display()),
            }
        }
        info!("📂 Loaded {} articles from {} files", articles.len(), paths.len());
        Ok(articles)
    }
}

fn into_fetch(err: Error) -> Error {
    if err.is_fetch() {
        err
    } else {
        Error::Fetch(err.to_string())
    }
}

/// `None` when the file is empty or cannot be read as text.
async fn read_article(path: &Path) -> Result<Option<Article>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::Fetch(format!("File not found: {}", path.display())));
        }
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            return Ok(None);
        }
    };
    if content.trim().is_empty() {
        return Ok(None);
    }

    let modified = tokio::fs::metadata(path).await?.modified()?;
    let absolute = tokio::fs::canonicalize(path).await?;
    let url = Url::from_file_path(&absolute)
        .map_err(|_| Error::InvalidUrl(absolute.display().to_string()))?;

    let name = base_name(path);
    let main_text = content.trim().to_string();
    Ok(Some(Article {
        id: name.clone(),
        title: title_from_name(&name),
        summary: first_paragraph(&main_text).to_string(),
        main_text,
        source: source_from_name(&name),
        published_at: DateTime::<Utc>::from(modified),
        url: url.to_string(),
        authors: vec![],
        image_url: None,
        bias: Bias::Center,
    }))
}

/// File name without a trailing `.txt`.
fn base_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(".txt") {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title_from_name(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `articleX_source_name` names the publisher after the first underscore;
/// a name without one is "<Name> News".
fn source_from_name(name: &str) -> String {
    let parts: Vec<&str> = name.split('_').collect();
    let source = match parts.as_slice() {
        [single] => format!("{} News", capitalize(single)),
        [_, rest @ ..] => rest
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| capitalize(p))
            .collect::<Vec<_>>()
            .join(" "),
        [] => String::new(),
    };
    if source.trim().is_empty() {
        DEFAULT_SOURCE_NAME.to_string()
    } else {
        source
    }
}

fn first_paragraph(text: &str) -> &str {
    text.split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or_default()
}
