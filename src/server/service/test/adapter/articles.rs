use super::*;
use crate::server::service::adapter::{articles::ArticlesAdapter, scraper::HttpArticleScraper};
use test_utils::{
    fixture::news_page::{news_page, NewsCard},
    mock::news::mount_news_page,
};

fn adapter(server: &MockServer) -> ArticlesAdapter {
    let page_url = url::Url::parse(&format!("{}/en/news", server.uri())).unwrap();
    let scraper = HttpArticleScraper::new(reqwest::Client::new(), page_url).unwrap();

    ArticlesAdapter::new(Arc::new(scraper), fast_retry())
}

/// Tests turning a news page into records.
///
/// Expected: URL used as id, category and image kept, undated card dropped
#[tokio::test]
async fn scrapes_articles() {
    let server = MockServer::start().await;
    mount_news_page(
        &server,
        "/en/news",
        news_page(&[
            NewsCard::new("Patch Notes", "/en/news/patch", "January 3, 2025")
                .category("Updates")
                .image("/img/patch.jpg"),
            NewsCard::new("Undated", "/en/news/undated", "someday"),
            NewsCard::new("Community", "/en/news/community", "2025-01-02"),
        ]),
    )
    .await;

    let records = adapter(&server).fetch(context(10)).await;

    let expected_url = format!("{}/en/news/patch", server.uri());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, expected_url);
    assert_eq!(records[0].url, expected_url);
    assert_eq!(records[0].category, "Updates");
    assert_eq!(records[0].timestamp, day(3));
    assert_eq!(
        records[0].image_url(),
        Some(format!("{}/img/patch.jpg", server.uri()).as_str())
    );
    assert_eq!(records[1].category, "Uncategorized");
}

/// Tests a news site that keeps failing.
///
/// Expected: empty batch after three attempts
#[tokio::test]
async fn failing_site_returns_empty() {
    let server = MockServer::start().await;
    nexus_mock::mount_failure(&server, "/en/news", 503, 3).await;

    let records = adapter(&server).fetch(context(10)).await;

    assert!(records.is_empty());
}
