use serde::{Deserialize, Serialize};
use std::fmt;

/// Czech administrative regions (kraje), named as they appear in
/// transliterated listing addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Praha")]
    Praha,
    #[serde(rename = "Jihocesky kraj")]
    Jihocesky,
    #[serde(rename = "Jihomoravsky kraj")]
    Jihomoravsky,
    #[serde(rename = "Karlovarsky kraj")]
    Karlovarsky,
    #[serde(rename = "Kralovehradecky kraj")]
    Kralovehradecky,
    #[serde(rename = "Liberecky kraj")]
    Liberecky,
    #[serde(rename = "Moravskoslezsky kraj")]
    Moravskoslezsky,
    #[serde(rename = "Olomoucky kraj")]
    Olomoucky,
    #[serde(rename = "Pardubicky kraj")]
    Pardubicky,
    #[serde(rename = "Plzensky kraj")]
    Plzensky,
    #[serde(rename = "Stredocesky kraj")]
    Stredocesky,
    #[serde(rename = "Ustecky kraj")]
    Ustecky,
    #[serde(rename = "Kraj Vysocina")]
    Vysocina,
    #[serde(rename = "Zlinsky kraj")]
    Zlinsky,
}

impl Region {
    pub const ALL: [Region; 14] = [
        Region::Praha,
        Region::Jihocesky,
        Region::Jihomoravsky,
        Region::Karlovarsky,
        Region::Kralovehradecky,
        Region::Liberecky,
        Region::Moravskoslezsky,
        Region::Olomoucky,
        Region::Pardubicky,
        Region::Plzensky,
        Region::Stredocesky,
        Region::Ustecky,
        Region::Vysocina,
        Region::Zlinsky,
    ];

    /// Region assumed when an address carries no `kraj` marker.
    pub const CAPITAL: Region = Region::Praha;

    pub fn name(self) -> &'static str {
        match self {
            Region::Praha => "Praha",
            Region::Jihocesky => "Jihocesky kraj",
            Region::Jihomoravsky => "Jihomoravsky kraj",
            Region::Karlovarsky => "Karlovarsky kraj",
            Region::Kralovehradecky => "Kralovehradecky kraj",
            Region::Liberecky => "Liberecky kraj",
            Region::Moravskoslezsky => "Moravskoslezsky kraj",
            Region::Olomoucky => "Olomoucky kraj",
            Region::Pardubicky => "Pardubicky kraj",
            Region::Plzensky => "Plzensky kraj",
            Region::Stredocesky => "Stredocesky kraj",
            Region::Ustecky => "Ustecky kraj",
            Region::Vysocina => "Kraj Vysocina",
            Region::Zlinsky => "Zlinsky kraj",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Region> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
