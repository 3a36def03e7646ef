//! Static documents served by mock upstreams.
//!
//! - `news_page` - News listing pages in the markup the article scraper understands

pub mod news_page;
