//! Extract stage: walk the search result pages and flatten every listing
//! card into one raw dataset.

pub mod fetcher;
pub mod parser;

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info};

pub use crate::traits::fetcher::PageFetcher;
pub use fetcher::HttpPageFetcher;
pub use parser::parse_listing_page;

use crate::codec;
use crate::config::ExtractConfig;
use crate::error::Result;
use crate::types::RawRecord;

/// ASCII-safe rendering of locale-specific text (`Pronájem` -> `Pronajem`).
pub fn transliterate(text: String) -> String {
    if text.is_ascii() {
        text
    } else {
        deunicode::deunicode(&text)
    }
}

pub struct Extractor {
    fetcher: Arc<dyn PageFetcher>,
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ExtractConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch and parse the configured page range.
    ///
    /// Pages are fetched sequentially with a fixed idle delay in between.
    /// Any fetch or parse failure aborts the run; retrying is left to
    /// whoever scheduled it.
    pub async fn extract_records(&self) -> Result<Vec<RawRecord>> {
        let mut all = Vec::new();
        let (start, end) = (self.config.start_page, self.config.end_page);

        for page in start..=end {
            let html = self.fetcher.fetch_page(page).await?;
            let records = parse_listing_page(&html, page)?;
            debug!(page, cards = records.len(), "Parsed listing page");
            all.extend(records);

            if page < end {
                sleep(self.config.page_delay).await;
            }
        }

        info!(
            pages = end.saturating_sub(start) + 1,
            records = all.len(),
            "Extraction finished"
        );

        Ok(all
            .into_iter()
            .map(|r| r.map_text(transliterate))
            .collect())
    }

    /// Extract and serialize to the tab-delimited staging format.
    pub async fn extract(&self) -> Result<String> {
        let records = self.extract_records().await?;
        codec::encode_raw(&records)
    }
}
