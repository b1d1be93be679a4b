//! Shared cache-control policies for HTTP handlers.

/// Private responses must always be revalidated before reuse.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Catalog tables only change with a deployment.
pub const PUBLIC_MAX_AGE_ONE_HOUR: &str = "public, max-age=3600";

/// Header tuple for responses scoped to the signed-in user.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Header tuple for catalog listings.
pub const fn public_catalog_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_MAX_AGE_ONE_HOUR)
}
