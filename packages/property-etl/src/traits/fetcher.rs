use async_trait::async_trait;

use crate::error::Result;

/// Fetches one page of search results as HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<String>;
}
