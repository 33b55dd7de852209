//! Deterministic cleaning pipeline.
//!
//! Steps run in a fixed order; later ones rely on the cleanup done by
//! earlier ones (e.g. price filters need parsed prices, region validation
//! needs the split address).

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Paris;
use std::collections::HashSet;
use tracing::debug;

use super::parse::{is_foreign_currency, parse_price, parse_size, price_per_m2, split_region};
use crate::error::Result;
use crate::staging::{basename, layout::TIMESTAMP_FORMAT};
use crate::types::{CleanedRecord, ListingCategory, RawRecord, Region};

/// Anything cheaper is not a real listing, whatever its category.
pub const MIN_PRICE: i64 = 500;
/// Land sales above this price per m² are outliers.
pub const LAND_MAX_PRICE_PER_M2: i64 = 80_000;

/// Output of a transform: the cleaned rows plus the untouched input, which
/// gets archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedDataset {
    pub cleaned: Vec<CleanedRecord>,
    pub archived: Vec<RawRecord>,
}

/// Clean `raw`, keeping an unmodified copy for the archive.
pub fn transform(
    raw: Vec<RawRecord>,
    source_key: &str,
    dump_date: &str,
) -> Result<TransformedDataset> {
    let archived = raw.clone();
    let cleaned = clean_and_transform(raw, source_key, dump_date)?;
    Ok(TransformedDataset { cleaned, archived })
}

/// Processing timestamp stamped on every cleaned row.
pub fn dump_date_at(now: DateTime<Utc>) -> String {
    now.with_timezone(&Paris).format(TIMESTAMP_FORMAT).to_string()
}

/// Row being cleaned, carrying values parsed so far.
struct Candidate {
    record: RawRecord,
    category: ListingCategory,
    price: i64,
}

pub fn clean_and_transform(
    raw: Vec<RawRecord>,
    source_key: &str,
    dump_date: &str,
) -> Result<Vec<CleanedRecord>> {
    let input_rows = raw.len();

    let records = dedupe_by_link(raw);
    let unique_rows = records.len();

    let records: Vec<RawRecord> = records
        .into_iter()
        .map(normalize_whitespace)
        .filter(|r| !is_foreign_currency(&r.price_czk))
        .collect();
    let local_rows = records.len();

    // a malformed price aborts the whole run
    let candidates = records
        .into_iter()
        .map(|record| {
            let price = parse_price(&record.price_czk)?;
            let category = ListingCategory::classify(&record.purpose);
            Ok(Candidate {
                record,
                category,
                price,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let candidates: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| has_plausible_price(c.category, c.price))
        .collect();
    let priced_rows = candidates.len();

    let file_name = basename(source_key).to_string();
    let cleaned: Vec<CleanedRecord> = candidates
        .into_iter()
        .filter_map(|c| {
            let size_m2 = parse_size(c.record.size_m2.as_deref());
            let (region_name, address) = split_region(&c.record.address);
            let region = Region::from_name(&region_name)?;
            let price_per_m2 = price_per_m2(c.price, size_m2);

            let overpriced = price_per_m2.is_some_and(|p| p > LAND_MAX_PRICE_PER_M2);
            if c.category.is_land_sale() && overpriced {
                return None;
            }

            Some(CleanedRecord {
                purpose: c.record.purpose,
                address,
                region,
                size_m2,
                design: c.record.design,
                price_czk: c.price,
                price_per_m2,
                link: c.record.link,
                dump_date: dump_date.to_string(),
                file_name: file_name.clone(),
            })
        })
        .collect();

    debug!(
        input_rows,
        unique_rows,
        local_rows,
        priced_rows,
        cleaned_rows = cleaned.len(),
        "Cleaned dataset"
    );

    Ok(cleaned)
}

/// Keep the first occurrence of every link, preserving order.
pub fn dedupe_by_link(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.link.clone()))
        .collect()
}

/// Replace non-breaking spaces with plain ones in every text field.
pub fn normalize_whitespace(record: RawRecord) -> RawRecord {
    record.map_text(|s| {
        if s.contains('\u{a0}') {
            s.replace('\u{a0}', " ")
        } else {
            s
        }
    })
}

fn has_plausible_price(category: ListingCategory, price: i64) -> bool {
    if price < MIN_PRICE {
        return false;
    }
    match category.price_floor() {
        Some(floor) => price > floor,
        None => true,
    }
}
