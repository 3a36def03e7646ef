//! News article as produced by an article scraper.

/// One article extracted from the news site, before normalization into a `Record`.
///
/// Dates are kept as raw text; the articles adapter decides whether they parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedArticle {
    pub title: String,
    /// Absolute article URL.
    pub url: String,
    pub date: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
}
