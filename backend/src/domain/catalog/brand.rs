//! Vehicle manufacturers.

use std::sync::OnceLock;

use super::{Catalog, CatalogEntry, CatalogError};

/// Vehicle brand, addressed by integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    Toyota,
    Hyundai,
    Kia,
    Mazda,
    Skoda,
    Mitsubishi,
    Suzuki,
    Nissan,
    Volkswagen,
    Chevrolet,
    Ford,
    Renault,
    Peugeot,
    Citroen,
    Honda,
    Subaru,
    Seat,
    Bmw,
    MercedesBenz,
    Audi,
    Tesla,
    Other,
}

impl CatalogEntry for Brand {
    type Code = i32;

    const NAME: &'static str = "brand";

    const VARIANTS: &'static [Self] = &[
        Self::Toyota,
        Self::Hyundai,
        Self::Kia,
        Self::Mazda,
        Self::Skoda,
        Self::Mitsubishi,
        Self::Suzuki,
        Self::Nissan,
        Self::Volkswagen,
        Self::Chevrolet,
        Self::Ford,
        Self::Renault,
        Self::Peugeot,
        Self::Citroen,
        Self::Honda,
        Self::Subaru,
        Self::Seat,
        Self::Bmw,
        Self::MercedesBenz,
        Self::Audi,
        Self::Tesla,
        Self::Other,
    ];

    fn to_code(self) -> i32 {
        match self {
            Self::Toyota => 1,
            Self::Hyundai => 2,
            Self::Kia => 3,
            Self::Mazda => 4,
            Self::Skoda => 5,
            Self::Mitsubishi => 6,
            Self::Suzuki => 7,
            Self::Nissan => 8,
            Self::Volkswagen => 9,
            Self::Chevrolet => 10,
            Self::Ford => 11,
            Self::Renault => 12,
            Self::Peugeot => 13,
            Self::Citroen => 14,
            Self::Honda => 15,
            Self::Subaru => 16,
            Self::Seat => 17,
            Self::Bmw => 18,
            Self::MercedesBenz => 19,
            Self::Audi => 20,
            Self::Tesla => 21,
            Self::Other => 99,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Toyota => "Toyota",
            Self::Hyundai => "Hyundai",
            Self::Kia => "Kia",
            Self::Mazda => "Mazda",
            Self::Skoda => "Skoda",
            Self::Mitsubishi => "Mitsubishi",
            Self::Suzuki => "Suzuki",
            Self::Nissan => "Nissan",
            Self::Volkswagen => "Volkswagen",
            Self::Chevrolet => "Chevrolet",
            Self::Ford => "Ford",
            Self::Renault => "Renault",
            Self::Peugeot => "Peugeot",
            Self::Citroen => "Citroen",
            Self::Honda => "Honda",
            Self::Subaru => "Subaru",
            Self::Seat => "Seat",
            Self::Bmw => "BMW",
            Self::MercedesBenz => "Mercedes-Benz",
            Self::Audi => "Audi",
            Self::Tesla => "Tesla",
            Self::Other => "Other",
        }
    }

    fn catalog() -> Result<&'static Catalog<Self>, CatalogError> {
        static CATALOG: OnceLock<Result<Catalog<Brand>, CatalogError>> = OnceLock::new();
        Catalog::cached(&CATALOG)
    }
}
