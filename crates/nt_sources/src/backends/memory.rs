use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use nt_core::{Article, ArticleSource, Bias, Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

struct MockStore {
    articles: Vec<Article>,
    unavailable: bool,
}

/// In-memory feed served after an artificial delay.
pub struct MockArticleSource {
    store: Arc<RwLock<MockStore>>,
    delay: Duration,
}

impl MockArticleSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            store: Arc::new(RwLock::new(MockStore {
                articles,
                unavailable: false,
            })),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the served collection; later fetches see the new set.
    pub async fn replace_articles(&self, articles: Vec<Article>) {
        self.store.write().await.articles = articles;
    }

    /// Simulate an outage: while set, every fetch fails.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.store.write().await.unavailable = unavailable;
    }
}

#[async_trait]
impl ArticleSource for MockArticleSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let store = self.store.read().await;
        if store.unavailable {
            return Err(Error::Fetch("mock feed is unavailable".to_string()));
        }
        Ok(store.articles.clone())
    }
}

/// The demo feed: three articles published 30 minutes, 2 hours and 4 hours ago.
pub fn mock_articles() -> Vec<Article> {
    let now = Utc::now();
    vec![
        Article {
            id: "1".to_string(),
            title: "Revolutionary AI Technology Transforms Healthcare Industry".to_string(),
            summary: "A groundbreaking artificial intelligence system is showing remarkable results in early disease detection, potentially saving thousands of lives through faster and more accurate diagnoses.".to_string(),
            main_text: "The healthcare industry is experiencing a revolutionary transformation with the introduction of advanced artificial intelligence systems that are demonstrating unprecedented accuracy in early disease detection. This groundbreaking technology utilizes machine learning algorithms trained on millions of medical images and patient records to identify potential health issues before they become critical.\n\nThe AI system, developed by a team of researchers at leading medical institutions, has shown remarkable results in clinical trials. In a recent study involving over 10,000 patients, the AI successfully identified early-stage cancers with 95% accuracy, significantly outperforming traditional diagnostic methods.\n\nImplementation of the AI system is already underway in several major hospitals across the country, with plans for wider deployment in the coming year.".to_string(),
            source: "TechNews".to_string(),
            published_at: now - ChronoDuration::minutes(30),
            url: "https://example.com/ai-healthcare".to_string(),
            authors: vec!["Dr. Sarah Johnson".to_string(), "Michael Chen".to_string()],
            image_url: Some("https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=800&h=400&fit=crop".to_string()),
            bias: Bias::Center,
        },
        Article {
            id: "2".to_string(),
            title: "Global Climate Summit Reaches Historic Agreement".to_string(),
            summary: "World leaders unite on ambitious climate targets, pledging unprecedented investment in renewable energy and carbon reduction technologies.".to_string(),
            main_text: "In a landmark moment for global environmental policy, world leaders have reached a historic agreement at the International Climate Summit, committing to the most ambitious climate targets ever established. The agreement, signed by representatives from 195 countries, outlines a comprehensive roadmap for achieving net-zero carbon emissions by 2050.\n\nKey provisions of the agreement include a commitment to triple renewable energy capacity by 2030, establish a global carbon tax framework, and create a $100 billion annual fund to support developing nations in their transition to clean energy.\n\nThe agreement will now need to be ratified by individual national governments, a process that could take several years to complete.".to_string(),
            source: "Environmental Today".to_string(),
            published_at: now - ChronoDuration::hours(2),
            url: "https://example.com/climate-summit".to_string(),
            authors: vec!["Emma Rodriguez".to_string()],
            image_url: Some("https://images.unsplash.com/photo-1611273426858-450d8e3c9fce?w=800&h=400&fit=crop".to_string()),
            bias: Bias::Left,
        },
        Article {
            id: "3".to_string(),
            title: "Space Exploration Milestone: New Discoveries on Mars".to_string(),
            summary: "Latest rover mission uncovers evidence of ancient water systems, bringing scientists closer to understanding the possibility of past life on the red planet.".to_string(),
            main_text: "NASA's latest Mars rover mission has achieved a groundbreaking discovery that could reshape our understanding of the Red Planet's history and potential for past life. The rover has uncovered compelling evidence of extensive ancient water systems, including what appears to be remnants of river deltas and lake beds that existed billions of years ago.\n\nSedimentary rock formations found in the Jezero Crater show clear signs of having been shaped by flowing water over extended periods.\n\nThis discovery comes at a time when multiple space agencies are planning crewed missions to Mars within the next two decades.".to_string(),
            source: "Space Journal".to_string(),
            published_at: now - ChronoDuration::hours(4),
            url: "https://example.com/mars-discovery".to_string(),
            authors: vec!["Dr. James Wright".to_string(), "Dr. Lisa Park".to_string()],
            image_url: None,
            bias: Bias::Center,
        },
    ]
}
