//! Testing utilities: canned listing HTML and a mock page fetcher.
//!
//! Lets the extract stage and the full pipeline run without network access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{EtlError, Result};
use crate::traits::fetcher::PageFetcher;

/// One listing card in the site's markup.
pub fn listing_card(
    purpose: &str,
    address: &str,
    features: &[&str],
    price: &str,
    href: &str,
) -> String {
    let items: String = features
        .iter()
        .map(|f| format!(r#"<li class="FeaturesList_featuresListItem__SugGi">{}</li>"#, f))
        .collect();
    format!(
        r#"<article class="PropertyCard_propertyCard__qPQRK">
            <a href="{href}"><span class="PropertyCard_propertyCardLabel__lnHZu mb-2 text-uppercase">{purpose}</span></a>
            <p class="PropertyCard_propertyCardAddress__yzOdb text-truncate">{address}</p>
            <ul class="FeaturesList_featuresList__75Wet">{items}</ul>
            <strong class="PropertyPrice_propertyPriceAmount___dwT2">{price}</strong>
        </article>"#
    )
}

/// A search results page wrapping `cards`.
pub fn listing_page(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><body><main><div class="box mb-last-0">{}</div></main></body></html>"#,
        cards.join("\n")
    )
}

/// Serves canned HTML per page number and records which pages were asked for.
///
/// Pages without canned HTML answer with HTTP 404.
#[derive(Default, Clone)]
pub struct MockPageFetcher {
    pages: Arc<Mutex<HashMap<u32, String>>>,
    calls: Arc<Mutex<Vec<u32>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page: u32, html: impl Into<String>) -> Self {
        self.pages
            .lock()
            .expect("mock fetcher lock")
            .insert(page, html.into());
        self
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().expect("mock fetcher lock").clone()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String> {
        self.calls.lock().expect("mock fetcher lock").push(page);
        self.pages
            .lock()
            .expect("mock fetcher lock")
            .get(&page)
            .cloned()
            .ok_or_else(|| EtlError::HttpStatus {
                url: format!("mock://listings?page={}", page),
                status: 404,
            })
    }
}
