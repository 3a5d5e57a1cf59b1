use chrono::{DateTime, Utc};
use nt_core::{Article, Notification, NotificationKind};
use nt_reader::{ArticleDetail, PlaybackRequest, ReaderState};

/// "42m ago", "3h ago", "2d ago".
pub fn time_ago(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - published_at).num_minutes().max(0);
    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

pub fn long_date(published_at: DateTime<Utc>) -> String {
    published_at.format("%B %-d, %Y, %I:%M %p").to_string()
}

pub fn article_line(index: usize, article: &Article, now: DateTime<Utc>) -> String {
    format!(
        "{:>2}. {} | {} • {}\n    {}",
        index,
        article.title,
        article.source,
        time_ago(article.published_at, now),
        article.summary
    )
}

pub fn list_view(state: &ReaderState, now: DateTime<Utc>) -> String {
    if state.is_loading {
        return "Loading latest news...".to_string();
    }
    let mut out = format!("Latest News ({} articles)", state.filtered_articles.len());
    if state.is_refreshing {
        out.push_str(" [refreshing]");
    }
    if !state.search_text.trim().is_empty() {
        out.push_str(&format!(" matching \"{}\"", state.search_text));
    }
    for (i, article) in state.filtered_articles.iter().enumerate() {
        out.push('\n');
        out.push_str(&article_line(i + 1, article, now));
    }
    out
}

pub fn detail_view(detail: &ArticleDetail) -> String {
    let article = detail.article();
    let mut out = format!("{}\n{} | {}", article.title, article.source, long_date(article.published_at));
    if let Some(byline) = article.byline() {
        out.push_str(&format!(" | {}", byline));
    }
    out.push_str(&format!("\nOriginal: {}", article.url));
    if let Some(image) = &article.image_url {
        out.push_str(&format!("\nImage: {}", image));
    }
    out.push_str(&format!("\nBias: {} leaning | View: {}\n\n{}", article.bias, detail.mode(), detail.current_text()));
    out
}

/// The script as it would be read, one host per line.
pub fn script_view(request: &PlaybackRequest) -> String {
    let mut out = format!("🎙️ {}", request.title);
    for line in &request.lines {
        out.push_str(&format!("\n{}: {}", line.host, line.text));
    }
    out
}

pub fn notification_line(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Error => "!",
        NotificationKind::Info => "i",
    };
    format!("[{}] {}: {}", marker, notification.title, notification.message)
}
