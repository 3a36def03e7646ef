//! Adapter turning scraped news articles into records.

use std::sync::Arc;

use crate::server::{
    model::{
        article::ScrapedArticle,
        record::{extra_key, Record},
    },
    service::adapter::{retry::RetryPolicy, scraper::ArticleScraper, FetchAdapter, FetchContext},
    util::parse::parse_flexible_date,
};

pub struct ArticlesAdapter {
    scraper: Arc<dyn ArticleScraper>,
    retry: RetryPolicy,
}

impl ArticlesAdapter {
    pub fn new(scraper: Arc<dyn ArticleScraper>, retry: RetryPolicy) -> Self {
        Self { scraper, retry }
    }

    /// Normalizes one scraped article.
    ///
    /// The article URL doubles as its id. Articles whose date does not parse are rejected.
    ///
    /// # Returns
    /// - `Some(Record)` - Article with a valid date
    /// - `None` - Date missing or in an unsupported format
    pub fn record_from_article(article: ScrapedArticle) -> Option<Record> {
        let Some(timestamp) = parse_flexible_date(&article.date) else {
            tracing::warn!(
                "[articles] Skipping {}: invalid date '{}'",
                article.title,
                article.date
            );
            return None;
        };

        Some(
            Record::new(article.url.clone(), article.title, article.url, timestamp)
                .with_category(article.category)
                .with_extra(extra_key::IMAGE_URL, article.image_url),
        )
    }
}

#[serenity::async_trait]
impl FetchAdapter for ArticlesAdapter {
    fn name(&self) -> &str {
        "articles"
    }

    async fn fetch(&self, _context: FetchContext) -> Vec<Record> {
        tracing::info!("Scraping news articles...");

        let articles = match self.retry.run("news page", || self.scraper.scrape()).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("Error scraping news articles: {}", e);
                return Vec::new();
            }
        };

        tracing::info!("Scraped {} articles", articles.len());

        articles
            .into_iter()
            .filter_map(Self::record_from_article)
            .collect()
    }
}
