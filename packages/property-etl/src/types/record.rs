use serde::{Deserialize, Serialize};

use super::region::Region;

/// Column order of the raw dataset.
pub const RAW_COLUMNS: [&str; 6] = ["purpose", "address", "size_m2", "design", "price_czk", "link"];

/// Column order of the cleaned dataset and of the `properties_data` table.
pub const CLEANED_COLUMNS: [&str; 10] = [
    "purpose",
    "address",
    "region",
    "size_m2",
    "design",
    "price_czk",
    "price_per_m2",
    "link",
    "dump_date",
    "file_name",
];

/// A listing as scraped, every value still text.
///
/// Optional details are `None` when the card did not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub purpose: String,
    pub address: String,
    pub size_m2: Option<String>,
    pub design: Option<String>,
    pub price_czk: String,
    pub link: String,
}

impl RawRecord {
    /// Apply `f` to every text field.
    pub fn map_text(self, mut f: impl FnMut(String) -> String) -> Self {
        Self {
            purpose: f(self.purpose),
            address: f(self.address),
            size_m2: self.size_m2.map(&mut f),
            design: self.design.map(&mut f),
            price_czk: f(self.price_czk),
            link: f(self.link),
        }
    }
}

/// A listing after cleaning, ready for the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub purpose: String,
    pub address: String,
    pub region: Region,
    pub size_m2: i64,
    pub design: Option<String>,
    pub price_czk: i64,
    pub price_per_m2: Option<i64>,
    pub link: String,
    pub dump_date: String,
    pub file_name: String,
}
