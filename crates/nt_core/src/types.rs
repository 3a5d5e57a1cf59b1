use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editorial leaning attached to an article upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Left,
    Right,
    Center,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Left => "left",
            Bias::Right => "right",
            Bias::Center => "center",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub main_text: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub bias: Bias,
}

impl Article {
    pub fn byline(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(format!("By {}", self.authors.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wire_article() {
        let value = json!({
            "id": "1",
            "title": "Revolutionary AI Technology Transforms Healthcare Industry",
            "summary": "A groundbreaking artificial intelligence system",
            "mainText": "The healthcare industry is experiencing a revolutionary transformation",
            "source": "TechNews",
            "publishedAt": "2024-05-01T10:30:00Z",
            "url": "https://example.com/ai-healthcare",
            "bias": "center"
        });

        let article: Article = serde_json::from_value(value).unwrap();
        assert_eq!(article.bias, Bias::Center);
        assert!(article.authors.is_empty());
        assert!(article.image_url.is_none());
        assert_eq!(article.byline(), None);
        assert_eq!(article.published_at.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }

    #[test]
    fn test_unknown_bias_is_rejected() {
        let value = json!({
            "id": "1",
            "title": "t",
            "summary": "s",
            "mainText": "m",
            "source": "src",
            "publishedAt": "2024-05-01T10:30:00Z",
            "url": "https://example.com",
            "bias": "unknown"
        });

        assert!(serde_json::from_value::<Article>(value).is_err());
    }

    #[test]
    fn test_byline_joins_authors() {
        let article = Article {
            id: "2".to_string(),
            title: "Global Climate Summit Reaches Historic Agreement".to_string(),
            summary: String::new(),
            main_text: String::new(),
            source: "Environmental Today".to_string(),
            published_at: Utc::now(),
            url: "https://example.com/climate-summit".to_string(),
            authors: vec!["Dr. James Wright".to_string(), "Dr. Lisa Park".to_string()],
            image_url: None,
            bias: Bias::Left,
        };

        assert_eq!(article.byline().as_deref(), Some("By Dr. James Wright, Dr. Lisa Park"));
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["bias"], "left");
        assert!(value.get("mainText").is_some());
        assert!(value.get("imageUrl").is_none());
    }
}
