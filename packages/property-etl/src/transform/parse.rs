//! Field-level parsers used by the cleaning pipeline.

use crate::error::{EtlError, Result};
use crate::types::Region;

pub const FOREIGN_CURRENCY: &str = "EUR";
pub const LOCAL_CURRENCY_UNIT: &str = "Kc";
pub const AREA_UNITS: [&str; 2] = ["m2", "m\u{b2}"];
pub const REGION_MARKER: &str = "kraj";

/// Listings priced in euros belong to the Slovak side of the site.
pub fn is_foreign_currency(price: &str) -> bool {
    price.contains(FOREIGN_CURRENCY)
}

/// `"12 500 Kc"` -> 12500. Every non-digit is discarded, so separators and
/// stray formatting are tolerated. Text with no digits at all, or more
/// digits than an `i64` holds, is fatal.
pub fn parse_price(price: &str) -> Result<i64> {
    let digits: String = price
        .replace(LOCAL_CURRENCY_UNIT, "")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return Err(EtlError::PriceParse {
            value: price.to_string(),
        });
    }
    digits.parse().map_err(|_| EtlError::PriceOverflow {
        value: price.to_string(),
    })
}

/// `"75 m2"` -> 75. Absent, unparseable or negative sizes become 0;
/// fractions truncate toward zero.
pub fn parse_size(size: Option<&str>) -> i64 {
    let Some(size) = size else {
        return 0;
    };

    let mut cleaned = size.to_string();
    for unit in AREA_UNITS {
        cleaned = cleaned.replace(unit, "");
    }

    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.trunc() as i64,
        _ => 0,
    }
}

/// Split a trailing region name off an address.
///
/// When the address mentions `kraj` (any case), its last two whitespace
/// tokens are taken as the region and the rest is the street address, each
/// with trailing commas stripped. Otherwise the listing is assumed to be in
/// the capital and the address is returned untouched.
///
/// Known weakness: the two-token rule misreads addresses whose region name
/// is not exactly the last two tokens (e.g. a trailing district). Such rows
/// produce a non-region and are dropped by region validation downstream.
pub fn split_region(address: &str) -> (String, String) {
    if !address.to_lowercase().contains(REGION_MARKER) {
        return (Region::CAPITAL.name().to_string(), address.to_string());
    }

    let words: Vec<&str> = address.split_whitespace().collect();
    let cut = words.len().saturating_sub(2);

    let region = if words.len() >= 2 {
        words[cut..].join(" ").trim_end_matches(',').to_string()
    } else {
        String::new()
    };
    let street = words[..cut].join(" ").trim_end_matches(',').to_string();

    (region, street)
}

/// `ceil(price / size)`, or `None` when the size is unknown or the result is 0.
pub fn price_per_m2(price: i64, size: i64) -> Option<i64> {
    if size <= 0 {
        return None;
    }
    let ceil = price / size + i64::from(price % size > 0);
    (ceil > 0).then_some(ceil)
}
