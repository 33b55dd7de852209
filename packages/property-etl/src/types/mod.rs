//! Data types shared by every stage.

pub mod category;
pub mod record;
pub mod region;

pub use category::ListingCategory;
pub use record::{CleanedRecord, RawRecord, CLEANED_COLUMNS, RAW_COLUMNS};
pub use region::Region;
