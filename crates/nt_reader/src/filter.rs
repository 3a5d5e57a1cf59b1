//! Client-side article search.
//!
//! A query matches an article when its lowercase form is a substring of the
//! lowercase title, summary or source. There is no tokenization or ranking;
//! the result keeps feed order.

use nt_core::Article;

/// Lowercased query, or `None` when it is blank.
///
/// Whitespace only decides blankness; a non-blank query is matched as typed,
/// padding included.
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// `needle` must already be lowercase.
pub fn matches(article: &Article, needle: &str) -> bool {
    [&article.title, &article.summary, &article.source]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

pub fn filter_articles(articles: &[Article], query: &str) -> Vec<Article> {
    match normalize_query(query) {
        None => articles.to_vec(),
        Some(needle) => articles
            .iter()
            .filter(|article| matches(article, &needle))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nt_core::Bias;

    fn article(id: &str, title: &str, summary: &str, source: &str) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            main_text: format!("Body of {}", title),
            source: source.to_string(),
            published_at: Utc::now(),
            url: format!("https://example.com/{}", id),
            authors: vec![],
            image_url: None,
            bias: Bias::Center,
        }
    }

    fn sample() -> Vec<Article> {
        vec![
            article("1", "AI Transforms Healthcare", "Early disease detection", "TechNews"),
            article("2", "Climate Summit Agreement", "Renewable energy pledges", "Environmental Today"),
            article("3", "Mars Discovery", "Ancient water systems", "Space Journal"),
            article("4", "Café culture returns", "Cities reopen", "Lifestyle Weekly"),
        ]
    }

    fn ids(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    fn is_subsequence(sub: &[Article], full: &[Article]) -> bool {
        let mut rest = full.iter();
        sub.iter().all(|needle| rest.any(|a| a.id == needle.id))
    }

    #[test]
    fn test_empty_and_whitespace_query_is_identity() {
        let articles = sample();
        assert_eq!(filter_articles(&articles, ""), articles);
        assert_eq!(filter_articles(&articles, "   \t"), articles);
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let articles = sample();
        for query in ["a", "e", "news", "s", "zzz", "today", "ai"] {
            let filtered = filter_articles(&articles, query);
            assert!(is_subsequence(&filtered, &articles), "query {:?}", query);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let articles = sample();
        assert_eq!(filter_articles(&articles, "AI"), filter_articles(&articles, "ai"));
        assert_eq!(ids(&filter_articles(&articles, "MARS")), vec!["3"]);
    }

    #[test]
    fn test_matches_each_field() {
        let articles = sample();
        assert_eq!(ids(&filter_articles(&articles, "mars")), vec!["3"]);
        assert_eq!(ids(&filter_articles(&articles, "renewable")), vec!["2"]);
        assert_eq!(ids(&filter_articles(&articles, "space journal")), vec!["3"]);
        assert!(filter_articles(&articles, "xyz123").is_empty());
    }

    #[test]
    fn test_main_text_is_not_searched() {
        let articles = sample();
        assert!(filter_articles(&articles, "body of").is_empty());
    }

    #[test]
    fn test_accent_sensitive() {
        let articles = sample();
        assert_eq!(ids(&filter_articles(&articles, "CAFÉ")), vec!["4"]);
        assert!(filter_articles(&articles, "cafe culture").is_empty());
    }

    #[test]
    fn test_padding_is_part_of_the_query() {
        let articles = sample();
        assert!(filter_articles(&articles, "Journal ").is_empty());
        assert!(filter_articles(&articles, "  mars").is_empty());
        assert_eq!(ids(&filter_articles(&articles, "Space ")), vec!["3"]);
        assert_eq!(normalize_query(" Mars "), Some(" mars ".to_string()));
        assert_eq!(normalize_query(" \t "), None);
    }
}
