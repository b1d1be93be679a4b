//! Body colours.

use std::sync::OnceLock;

use super::{Catalog, CatalogEntry, CatalogError};

/// Vehicle body colour, addressed by integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
    Silver,
    Gray,
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Brown,
    Beige,
    Gold,
    Purple,
    Other,
}

impl CatalogEntry for Color {
    type Code = i32;

    const NAME: &'static str = "color";

    const VARIANTS: &'static [Self] = &[
        Self::White,
        Self::Black,
        Self::Silver,
        Self::Gray,
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Brown,
        Self::Beige,
        Self::Gold,
        Self::Purple,
        Self::Other,
    ];

    fn to_code(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => 2,
            Self::Silver => 3,
            Self::Gray => 4,
            Self::Red => 5,
            Self::Blue => 6,
            Self::Green => 7,
            Self::Yellow => 8,
            Self::Orange => 9,
            Self::Brown => 10,
            Self::Beige => 11,
            Self::Gold => 12,
            Self::Purple => 13,
            Self::Other => 99,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Silver => "Silver",
            Self::Gray => "Gray",
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Brown => "Brown",
            Self::Beige => "Beige",
            Self::Gold => "Gold",
            Self::Purple => "Purple",
            Self::Other => "Other",
        }
    }

    fn catalog() -> Result<&'static Catalog<Self>, CatalogError> {
        static CATALOG: OnceLock<Result<Catalog<Color>, CatalogError>> = OnceLock::new();
        Catalog::cached(&CATALOG)
    }
}
