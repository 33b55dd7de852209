//! Listing taxonomy.
//!
//! `purpose` labels are classified once into a [`ListingCategory`]; the
//! price plausibility rules hang off the category instead of re-matching
//! keyword lists at every filtering step.

/// What is being offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Apartment,
    House,
    Office,
    NonResidential,
    Cottage,
    Land,
    Garage,
    Other,
}

/// Classification of a listing's `purpose` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingCategory {
    Rent(PropertyKind),
    Sale(PropertyKind),
    Other,
}

/// Transliterated labels as the listing site prints them.
const LABELS: &[(&str, ListingCategory)] = &[
    ("pronajem kancelare", ListingCategory::Rent(PropertyKind::Office)),
    ("pronajem nebytoveho prostoru", ListingCategory::Rent(PropertyKind::NonResidential)),
    ("pronajem chaty, chalupy", ListingCategory::Rent(PropertyKind::Cottage)),
    ("pronajem domu", ListingCategory::Rent(PropertyKind::House)),
    ("pronajem pozemku", ListingCategory::Rent(PropertyKind::Land)),
    ("pronajem bytu", ListingCategory::Rent(PropertyKind::Apartment)),
    ("pronajem garaze", ListingCategory::Rent(PropertyKind::Garage)),
    ("prodej bytu", ListingCategory::Sale(PropertyKind::Apartment)),
    ("prodej domu", ListingCategory::Sale(PropertyKind::House)),
    ("prodej nebytoveho prostoru", ListingCategory::Sale(PropertyKind::NonResidential)),
    ("prodej pozemku", ListingCategory::Sale(PropertyKind::Land)),
    ("prodej chaty, chalupy", ListingCategory::Sale(PropertyKind::Cottage)),
    ("prodej garaze", ListingCategory::Sale(PropertyKind::Garage)),
    ("prodej kancelare", ListingCategory::Sale(PropertyKind::Office)),
];

/// Checked in order; land goes first so "commercial land" stays land.
const ENGLISH_KINDS: &[(&str, PropertyKind)] = &[
    ("land", PropertyKind::Land),
    ("plot", PropertyKind::Land),
    ("apartment", PropertyKind::Apartment),
    ("flat", PropertyKind::Apartment),
    ("house", PropertyKind::House),
    ("office", PropertyKind::Office),
    ("non-residential", PropertyKind::NonResidential),
    ("commercial", PropertyKind::NonResidential),
    ("cottage", PropertyKind::Cottage),
    ("cabin", PropertyKind::Cottage),
    ("garage", PropertyKind::Garage),
];

/// Rent listings at or below this price are implausible.
pub const RENT_PRICE_FLOOR: i64 = 1000;
/// Sale listings at or below this price are implausible.
pub const SALE_PRICE_FLOOR: i64 = 20000;

impl ListingCategory {
    /// Classify a transliterated `purpose` label (case-insensitive).
    pub fn classify(purpose: &str) -> Self {
        let lower = purpose.to_lowercase();

        if let Some((_, category)) = LABELS.iter().find(|(label, _)| lower.contains(label)) {
            return *category;
        }

        if let Some(rest) = lower.split("rent of").nth(1) {
            return ListingCategory::Rent(english_kind(rest));
        }
        if let Some(rest) = lower.split("sale of").nth(1) {
            return ListingCategory::Sale(english_kind(rest));
        }

        if lower.contains("pronajem") {
            ListingCategory::Rent(PropertyKind::Other)
        } else if lower.contains("prodej") {
            ListingCategory::Sale(PropertyKind::Other)
        } else {
            ListingCategory::Other
        }
    }

    /// Highest price that is still considered a data-entry error for this
    /// category. Records priced at or below it are dropped.
    pub fn price_floor(self) -> Option<i64> {
        use PropertyKind::*;
        match self {
            ListingCategory::Rent(Office | NonResidential | Cottage | House | Land) => {
                Some(RENT_PRICE_FLOOR)
            }
            ListingCategory::Sale(
                Apartment | House | NonResidential | Land | Cottage | Garage | Office,
            ) => Some(SALE_PRICE_FLOOR),
            _ => None,
        }
    }

    pub fn is_land_sale(self) -> bool {
        self == ListingCategory::Sale(PropertyKind::Land)
    }
}

fn english_kind(rest: &str) -> PropertyKind {
    ENGLISH_KINDS
        .iter()
        .find(|(word, _)| rest.contains(word))
        .map(|(_, kind)| *kind)
        .unwrap_or(PropertyKind::Other)
}
