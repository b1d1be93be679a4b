//! Code-keyed lookup tables for the closed enumerations exchanged with clients.
//!
//! Each enumeration lists its variants once. A [`Catalog`] built from that
//! list indexes variants by code and by label, rejecting duplicates at build
//! time. Tables are built lazily on first use and cached for the life of the
//! process; [`verify_catalogs`] forces every table at start-up so a broken
//! table stops the server before it accepts traffic.

mod brand;
mod color;
mod country;
mod notification_kind;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::OnceLock;

pub use brand::Brand;
pub use color::Color;
pub use country::Country;
pub use notification_kind::NotificationKind;

use serde_json::json;

use super::Error;
use super::ports::define_port_error;

define_port_error! {
    /// Failures raised while building or querying a catalog table.
    pub enum CatalogError {
        /// No variant carries the requested code.
        InvalidCode { catalog: String, code: String } => "unknown {catalog} code: {code}",
        /// No variant carries the requested label.
        InvalidLabel { catalog: String, label: String } => "unknown {catalog} label: {label}",
        /// Two variants share a code.
        DuplicateCode { catalog: String, code: String } =>
            "{catalog} table lists code {code} more than once",
        /// Two variants share a label.
        DuplicateLabel { catalog: String, label: String } =>
            "{catalog} table lists label {label} more than once",
    }
}

impl From<CatalogError> for Error {
    fn from(value: CatalogError) -> Self {
        let message = value.to_string();
        match value {
            CatalogError::InvalidCode { catalog, code } => {
                Self::invalid_request(message).with_details(json!({
                    "code": "invalid_code",
                    "catalog": catalog,
                    "value": code,
                }))
            }
            CatalogError::InvalidLabel { catalog, label } => {
                Self::invalid_request(message).with_details(json!({
                    "code": "invalid_label",
                    "catalog": catalog,
                    "value": label,
                }))
            }
            CatalogError::DuplicateCode { .. } | CatalogError::DuplicateLabel { .. } => {
                Self::internal(message)
            }
        }
    }
}

/// A closed enumeration addressable by a stable external code.
///
/// `to_code` and `label` are total: every variant has exactly one of each.
pub trait CatalogEntry: Copy + Eq + Debug + Send + Sync + Sized + 'static {
    /// External code type (integers for most tables, strings for countries).
    type Code: Clone + Eq + Hash + Ord + Display + Debug + Send + Sync + 'static;

    /// Catalog name used in error messages and field details.
    const NAME: &'static str;

    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Stable external code of this variant.
    fn to_code(self) -> Self::Code;

    /// Stable human-readable label of this variant.
    fn label(self) -> &'static str;

    /// Process-wide table for this enumeration.
    ///
    /// # Errors
    /// Returns the build failure when the variant list is inconsistent.
    fn catalog() -> Result<&'static Catalog<Self>, CatalogError>;

    /// Resolve an external code into a variant.
    ///
    /// # Errors
    /// [`CatalogError::InvalidCode`] when the code is not listed.
    fn resolve<Q>(code: &Q) -> Result<Self, CatalogError>
    where
        Self::Code: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        Self::catalog()?.resolve(code)
    }

    /// Resolve a label into a variant.
    ///
    /// # Errors
    /// [`CatalogError::InvalidLabel`] when the label is not listed.
    fn resolve_label(label: &str) -> Result<Self, CatalogError> {
        Self::catalog()?.resolve_label(label)
    }
}

/// Bidirectional index over a catalog's variants.
#[derive(Debug)]
pub struct Catalog<T: CatalogEntry> {
    by_code: HashMap<T::Code, T>,
    by_label: HashMap<&'static str, T>,
    ordered: Vec<T>,
}

impl<T: CatalogEntry> Catalog<T> {
    /// Index the supplied variants, rejecting duplicate codes or labels.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateCode`] or [`CatalogError::DuplicateLabel`].
    pub fn build(variants: &[T]) -> Result<Self, CatalogError> {
        let mut by_code = HashMap::with_capacity(variants.len());
        let mut by_label = HashMap::with_capacity(variants.len());

        for variant in variants {
            match by_code.entry(variant.to_code()) {
                Entry::Occupied(entry) => {
                    return Err(CatalogError::duplicate_code(
                        T::NAME,
                        entry.key().to_string(),
                    ));
                }
                Entry::Vacant(entry) => {
                    entry.insert(*variant);
                }
            }
            if by_label.insert(variant.label(), *variant).is_some() {
                return Err(CatalogError::duplicate_label(T::NAME, variant.label()));
            }
        }

        let mut ordered = variants.to_vec();
        ordered.sort_by_key(|variant| variant.to_code());
        Ok(Self {
            by_code,
            by_label,
            ordered,
        })
    }

    /// Return the cached table held in `cell`, building it on first use.
    ///
    /// # Errors
    /// Returns the (cached) build failure.
    pub fn cached(
        cell: &'static OnceLock<Result<Self, CatalogError>>,
    ) -> Result<&'static Self, CatalogError> {
        cell.get_or_init(|| Self::build(T::VARIANTS))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Look up a variant by code.
    ///
    /// # Errors
    /// [`CatalogError::InvalidCode`] when the code is not listed.
    pub fn resolve<Q>(&self, code: &Q) -> Result<T, CatalogError>
    where
        T::Code: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        self.by_code
            .get(code)
            .copied()
            .ok_or_else(|| CatalogError::invalid_code(T::NAME, code.to_string()))
    }

    /// Look up a variant by label.
    ///
    /// # Errors
    /// [`CatalogError::InvalidLabel`] when the label is not listed.
    pub fn resolve_label(&self, label: &str) -> Result<T, CatalogError> {
        self.by_label
            .get(label)
            .copied()
            .ok_or_else(|| CatalogError::invalid_label(T::NAME, label))
    }

    /// Variants ordered by code.
    pub fn entries(&self) -> &[T] {
        &self.ordered
    }
}

/// Build every catalog table, surfacing the first inconsistency.
///
/// # Errors
/// Returns the first duplicate code or label found.
///
/// # Examples
/// ```
/// unblock::domain::catalog::verify_catalogs().expect("catalog tables are consistent");
/// ```
pub fn verify_catalogs() -> Result<(), CatalogError> {
    Brand::catalog()?;
    Color::catalog()?;
    Country::catalog()?;
    NotificationKind::catalog()?;
    Ok(())
}
