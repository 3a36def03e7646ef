//! News page scraping.
//!
//! The articles adapter depends only on `ArticleScraper`. The bundled implementation
//! downloads the listing page and extracts article cards with regular expressions: each
//! `<article>` element yields a link, a headline, a date and optionally a category
//! (`data-category`) and a preview image.

use std::time::Duration;

use regex::Regex;
use url::Url;

use crate::server::{error::AppError, model::article::ScrapedArticle};

/// Produces structured articles from the news site.
#[serenity::async_trait]
pub trait ArticleScraper: Send + Sync {
    /// Scrapes the current listing.
    ///
    /// # Returns
    /// - `Ok(Vec<ScrapedArticle>)` - Articles in page order, possibly empty
    /// - `Err(AppError)` - Page could not be retrieved
    async fn scrape(&self) -> Result<Vec<ScrapedArticle>, AppError>;
}

struct ArticlePatterns {
    card: Regex,
    category: Regex,
    link: Regex,
    headline: Regex,
    datetime: Regex,
    time_text: Regex,
    image: Regex,
    tag: Regex,
}

impl ArticlePatterns {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            card: Regex::new(r"(?is)<article\b([^>]*)>(.*?)</article>")?,
            category: Regex::new(r#"(?i)data-category\s*=\s*"([^"]*)""#)?,
            link: Regex::new(r#"(?i)<a\b[^>]*?\bhref\s*=\s*"([^"]+)""#)?,
            headline: Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]>")?,
            datetime: Regex::new(r#"(?i)<time\b[^>]*?\bdatetime\s*=\s*"([^"]+)""#)?,
            time_text: Regex::new(r"(?is)<time\b[^>]*>(.*?)</time>")?,
            image: Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*"([^"]+)""#)?,
            tag: Regex::new(r"(?s)<[^>]*>")?,
        })
    }

    fn capture<'a>(regex: &Regex, haystack: &'a str) -> Option<&'a str> {
        regex
            .captures(haystack)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().trim())
            .filter(|value| !value.is_empty())
    }

    fn text(&self, html: &str) -> String {
        let stripped = self.tag.replace_all(html, " ");
        decode_entities(&stripped.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

/// Scrapes article cards from an HTML listing page over HTTP.
pub struct HttpArticleScraper {
    http: reqwest::Client,
    page_url: Url,
    patterns: ArticlePatterns,
}

impl HttpArticleScraper {
    /// Creates a new HttpArticleScraper.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `page_url` - Listing page; relative article links resolve against it
    ///
    /// # Returns
    /// - `Ok(HttpArticleScraper)` - Scraper ready to use
    /// - `Err(AppError::InternalError)` - Extraction patterns failed to compile
    pub fn new(http: reqwest::Client, page_url: Url) -> Result<Self, AppError> {
        let patterns = ArticlePatterns::new()
            .map_err(|e| AppError::InternalError(format!("Invalid article pattern: {}", e)))?;

        Ok(Self {
            http,
            page_url,
            patterns,
        })
    }

    /// Extracts articles from a listing page.
    ///
    /// Cards without a link or headline are skipped. Dates are returned as found; the
    /// caller decides whether they parse.
    pub fn parse_page(&self, html: &str) -> Vec<ScrapedArticle> {
        let patterns = &self.patterns;

        patterns
            .card
            .captures_iter(html)
            .filter_map(|card| {
                let attributes = card.get(1).map_or("", |m| m.as_str());
                let body = card.get(2).map_or("", |m| m.as_str());

                let Some(href) = ArticlePatterns::capture(&patterns.link, body) else {
                    tracing::debug!("Skipping article card without link");
                    return None;
                };
                let url = match self.page_url.join(&decode_entities(href)) {
                    Ok(url) => url.to_string(),
                    Err(e) => {
                        tracing::debug!("Skipping article with invalid link {}: {}", href, e);
                        return None;
                    }
                };

                let title = patterns
                    .headline
                    .captures(body)
                    .and_then(|captures| captures.get(1))
                    .map(|m| patterns.text(m.as_str()))
                    .filter(|title| !title.is_empty());
                let Some(title) = title else {
                    tracing::debug!("Skipping article {} without headline", url);
                    return None;
                };

                let date = ArticlePatterns::capture(&patterns.datetime, body)
                    .map(str::to_string)
                    .or_else(|| {
                        ArticlePatterns::capture(&patterns.time_text, body)
                            .map(|text| patterns.text(text))
                    })
                    .unwrap_or_default();

                let image_url = ArticlePatterns::capture(&patterns.image, body)
                    .and_then(|src| self.page_url.join(&decode_entities(src)).ok())
                    .map(|url| url.to_string());

                Some(ScrapedArticle {
                    title,
                    url,
                    date,
                    category: ArticlePatterns::capture(&patterns.category, attributes)
                        .map(decode_entities),
                    image_url,
                })
            })
            .collect()
    }
}

#[serenity::async_trait]
impl ArticleScraper for HttpArticleScraper {
    async fn scrape(&self) -> Result<Vec<ScrapedArticle>, AppError> {
        let response = self
            .http
            .get(self.page_url.clone())
            .timeout(Duration::from_secs(60))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                url: self.page_url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;

        Ok(self.parse_page(&html))
    }
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
