//! Registration countries, keyed by ISO 3166-1 alpha-2 code.

use std::sync::OnceLock;

use super::{Catalog, CatalogEntry, CatalogError};

/// Country that issued a licence plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Israel,
    UnitedStates,
    UnitedKingdom,
    Germany,
    France,
    Italy,
    Spain,
    Netherlands,
    Greece,
    Cyprus,
    Jordan,
    Egypt,
}

impl CatalogEntry for Country {
    type Code = &'static str;

    const NAME: &'static str = "country";

    const VARIANTS: &'static [Self] = &[
        Self::Israel,
        Self::UnitedStates,
        Self::UnitedKingdom,
        Self::Germany,
        Self::France,
        Self::Italy,
        Self::Spain,
        Self::Netherlands,
        Self::Greece,
        Self::Cyprus,
        Self::Jordan,
        Self::Egypt,
    ];

    fn to_code(self) -> &'static str {
        match self {
            Self::Israel => "IL",
            Self::UnitedStates => "US",
            Self::UnitedKingdom => "GB",
            Self::Germany => "DE",
            Self::France => "FR",
            Self::Italy => "IT",
            Self::Spain => "ES",
            Self::Netherlands => "NL",
            Self::Greece => "GR",
            Self::Cyprus => "CY",
            Self::Jordan => "JO",
            Self::Egypt => "EG",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Israel => "Israel",
            Self::UnitedStates => "United States",
            Self::UnitedKingdom => "United Kingdom",
            Self::Germany => "Germany",
            Self::France => "France",
            Self::Italy => "Italy",
            Self::Spain => "Spain",
            Self::Netherlands => "Netherlands",
            Self::Greece => "Greece",
            Self::Cyprus => "Cyprus",
            Self::Jordan => "Jordan",
            Self::Egypt => "Egypt",
        }
    }

    fn catalog() -> Result<&'static Catalog<Self>, CatalogError> {
        static CATALOG: OnceLock<Result<Catalog<Country>, CatalogError>> = OnceLock::new();
        Catalog::cached(&CATALOG)
    }
}
