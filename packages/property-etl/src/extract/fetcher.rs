//! HTTP page fetcher - reqwest against the listing site's search pages.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{EtlError, Result};
use crate::traits::fetcher::PageFetcher;

/// Browser-like User-Agent; the site serves a stripped page to bots
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct HttpPageFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPageFetcher {
    pub fn new(source_url: &str) -> Result<Self> {
        let base_url = Url::parse(source_url)
            .map_err(|e| EtlError::Config(format!("invalid source url '{}': {}", source_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("cs,en-US;q=0.7,en;q=0.3"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| EtlError::Http {
                url: source_url.to_string(),
                source: e,
            })?;

        Ok(Self { client, base_url })
    }

    /// `https://www.bezrealitky.cz/vyhledat?page=3`
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);
        debug!(page, url = %url, "Fetching listing page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| EtlError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| EtlError::Http {
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_appends_page_number() {
        let fetcher = HttpPageFetcher::new("https://www.bezrealitky.cz/vyhledat").unwrap();
        assert_eq!(
            fetcher.page_url(3).as_str(),
            "https://www.bezrealitky.cz/vyhledat?page=3"
        );
    }

    #[test]
    fn invalid_source_url_is_config_error() {
        assert!(matches!(
            HttpPageFetcher::new("not a url"),
            Err(EtlError::Config(_))
        ));
    }
}
