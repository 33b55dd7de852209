//! Listing card parser.
//!
//! Class names are the site's generated CSS module names; when the site
//! redeploys they change and every page becomes "malformed".

use scraper::{ElementRef, Html, Selector};

use crate::error::{EtlError, Result};
use crate::types::RawRecord;

const LIST_CONTAINER: &str = "div.box.mb-last-0";
const CARD: &str = "article.PropertyCard_propertyCard__qPQRK";
const PURPOSE: &str = ".PropertyCard_propertyCardLabel__lnHZu";
const ADDRESS: &str = ".PropertyCard_propertyCardAddress__yzOdb";
const FEATURE_ITEM: &str = "li.FeaturesList_featuresListItem__SugGi";
const PRICE: &str = ".PropertyPrice_propertyPriceAmount___dwT2";
const LINK: &str = "a[href]";

/// Marks the feature item that carries the floor area.
const AREA_MARKER: &str = "m\u{b2}";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::Config(format!("invalid selector '{}': {}", css, e)))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Extract one raw record per listing card. Text is returned as printed on
/// the page (no transliteration yet).
pub fn parse_listing_page(html: &str, page: u32) -> Result<Vec<RawRecord>> {
    let document = Html::parse_document(html);

    let container_sel = selector(LIST_CONTAINER)?;
    let card_sel = selector(CARD)?;
    let purpose_sel = selector(PURPOSE)?;
    let address_sel = selector(ADDRESS)?;
    let feature_sel = selector(FEATURE_ITEM)?;
    let price_sel = selector(PRICE)?;
    let link_sel = selector(LINK)?;

    let malformed = |reason: String| EtlError::MalformedPage { page, reason };

    let container = document
        .select(&container_sel)
        .next()
        .ok_or_else(|| malformed(format!("missing listing container '{}'", LIST_CONTAINER)))?;

    let mut records = Vec::new();
    for (idx, card) in container.select(&card_sel).enumerate() {
        let required = |sel: &Selector, what: &str| {
            card.select(sel)
                .next()
                .map(text_of)
                .ok_or_else(|| malformed(format!("card {} has no {}", idx, what)))
        };

        let purpose = required(&purpose_sel, "purpose")?;
        let address = required(&address_sel, "address")?;
        let price_czk = required(&price_sel, "price")?;

        // size and design share one list and both are optional
        let mut size_m2 = None;
        let mut design = None;
        for item in card.select(&feature_sel) {
            let value = text_of(item);
            if value.contains(AREA_MARKER) {
                size_m2 = Some(value);
            } else {
                design = Some(value);
            }
        }

        let link = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string)
            .ok_or_else(|| malformed(format!("card {} has no link", idx)))?;

        records.push(RawRecord {
            purpose,
            address,
            size_m2,
            design,
            price_czk,
            link,
        });
    }

    Ok(records)
}
