//! News listing page fixtures.
//!
//! Each article is rendered as an `<article>` card carrying its category as a data
//! attribute, a link wrapping the preview image and headline, and a `<time>` element.

/// One article card on a fixture news page.
pub struct NewsCard {
    pub title: String,
    pub href: String,
    pub date: String,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl NewsCard {
    /// Creates a card without category or image.
    ///
    /// # Arguments
    /// - `title` - Headline text
    /// - `href` - Link target, absolute or relative to the page
    /// - `date` - Value of the `datetime` attribute
    pub fn new(title: &str, href: &str, date: &str) -> Self {
        Self {
            title: title.to_string(),
            href: href.to_string(),
            date: date.to_string(),
            category: None,
            image: None,
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    fn render(&self) -> String {
        let category = self
            .category
            .as_ref()
            .map(|c| format!(r#" data-category="{}""#, c))
            .unwrap_or_default();
        let image = self
            .image
            .as_ref()
            .map(|src| format!(r#"<img class="news-card__image" src="{}" alt="">"#, src))
            .unwrap_or_default();

        format!(
            r#"<article class="news-card"{category}>
  <a class="news-card__link" href="{href}">
    {image}
    <h3 class="news-card__title">{title}</h3>
  </a>
  <time datetime="{date}">{date}</time>
</article>"#,
            category = category,
            href = self.href,
            image = image,
            title = self.title,
            date = self.date,
        )
    }
}

/// Renders a full HTML page containing the given cards in order.
pub fn news_page(cards: &[NewsCard]) -> String {
    let body: Vec<String> = cards.iter().map(NewsCard::render).collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>News</title></head>
<body>
<header><a href="/">Home</a></header>
<main class="news-grid">
{}
</main>
</body>
</html>"#,
        body.join("\n")
    )
}
