//! Supported sports and team locations

use serde::{Deserialize, Serialize};

use super::validation::TeamValidationError;

/// Sport a team competes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sport {
    Soccer,
    Basketball,
    Baseball,
    Football,
    Hockey,
    Volleyball,
    Tennis,
    Cricket,
    Rugby,
    Lacrosse,
    Softball,
    Handball,
}

impl Sport {
    pub const ALL: [Sport; 12] = [
        Sport::Soccer,
        Sport::Basketball,
        Sport::Baseball,
        Sport::Football,
        Sport::Hockey,
        Sport::Volleyball,
        Sport::Tennis,
        Sport::Cricket,
        Sport::Rugby,
        Sport::Lacrosse,
        Sport::Softball,
        Sport::Handball,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soccer => "Soccer",
            Self::Basketball => "Basketball",
            Self::Baseball => "Baseball",
            Self::Football => "Football",
            Self::Hockey => "Hockey",
            Self::Volleyball => "Volleyball",
            Self::Tennis => "Tennis",
            Self::Cricket => "Cricket",
            Self::Rugby => "Rugby",
            Self::Lacrosse => "Lacrosse",
            Self::Softball => "Softball",
            Self::Handball => "Handball",
        }
    }

    /// Parse a sport name, ignoring case and surrounding whitespace
    pub fn parse(value: &str) -> Result<Self, TeamValidationError> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|sport| sport.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| TeamValidationError::UnknownSport(value.to_string()))
    }
}

impl std::str::FromStr for Sport {
    type Err = TeamValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ISO 3166-1 alpha-3 country codes accepted as team locations
pub const COUNTRY_CODES: &[&str] = &[
    "AFG", "ALA", "ALB", "DZA", "ASM", "AND", "AGO", "AIA", "ATA", "ATG", "ARG", "ARM", "ABW",
    "AUS", "AUT", "AZE", "BHS", "BHR", "BGD", "BRB", "BLR", "BEL", "BLZ", "BEN", "BMU", "BTN",
    "BOL", "BES", "BIH", "BWA", "BVT", "BRA", "IOT", "BRN", "BGR", "BFA", "BDI", "CPV", "KHM",
    "CMR", "CAN", "CYM", "CAF", "TCD", "CHL", "CHN", "CXR", "CCK", "COL", "COM", "COD", "COG",
    "COK", "CRI", "CIV", "HRV", "CUB", "CUW", "CYP", "CZE", "DNK", "DJI", "DMA", "DOM", "ECU",
    "EGY", "SLV", "GNQ", "ERI", "EST", "SWZ", "ETH", "FLK", "FRO", "FJI", "FIN", "FRA", "GUF",
    "PYF", "ATF", "GAB", "GMB", "GEO", "DEU", "GHA", "GIB", "GRC", "GRL", "GRD", "GLP", "GUM",
    "GTM", "GGY", "GIN", "GNB", "GUY", "HTI", "HMD", "VAT", "HND", "HKG", "HUN", "ISL", "IND",
    "IDN", "IRN", "IRQ", "IRL", "IMN", "ISR", "ITA", "JAM", "JPN", "JEY", "JOR", "KAZ", "KEN",
    "KIR", "PRK", "KOR", "KWT", "KGZ", "LAO", "LVA", "LBN", "LSO", "LBR", "LBY", "LIE", "LTU",
    "LUX", "MAC", "MDG", "MWI", "MYS", "MDV", "MLI", "MLT", "MHL", "MTQ", "MRT", "MUS", "MYT",
    "MEX", "FSM", "MDA", "MCO", "MNG", "MNE", "MSR", "MAR", "MOZ", "MMR", "NAM", "NRU", "NPL",
    "NLD", "NCL", "NZL", "NIC", "NER", "NGA", "NIU", "NFK", "MKD", "MNP", "NOR", "OMN", "PAK",
    "PLW", "PSE", "PAN", "PNG", "PRY", "PER", "PHL", "PCN", "POL", "PRT", "PRI", "QAT", "REU",
    "ROU", "RUS", "RWA", "BLM", "SHN", "KNA", "LCA", "MAF", "SPM", "VCT", "WSM", "SMR", "STP",
    "SAU", "SEN", "SRB", "SYC", "SLE", "SGP", "SXM", "SVK", "SVN", "SLB", "SOM", "ZAF", "SGS",
    "SSD", "ESP", "LKA", "SDN", "SUR", "SJM", "SWE", "CHE", "SYR", "TWN", "TJK", "TZA", "THA",
    "TLS", "TGO", "TKL", "TON", "TTO", "TUN", "TUR", "TKM", "TCA", "TUV", "UGA", "UKR", "ARE",
    "GBR", "USA", "UMI", "URY", "UZB", "VUT", "VEN", "VNM", "VGB", "VIR", "WLF", "ESH", "YEM",
    "ZMB", "ZWE",
];

/// Team location as an upper-case alpha-3 country code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn parse(value: &str) -> Result<Self, TeamValidationError> {
        let code = value.trim().to_ascii_uppercase();

        if COUNTRY_CODES.contains(&code.as_str()) {
            Ok(Self(code))
        } else {
            Err(TeamValidationError::UnknownLocation(value.trim().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
