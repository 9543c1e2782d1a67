//! Skiphire prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartCommand, CartLine, CartState, CartStore, reduce},
    catalog::{
        Catalog, CatalogError, CatalogFilter, CatalogLoader, FallbackCatalogLoader,
        FixtureCatalogLoader, HttpCatalogLoader, Sort, SortKey, SortOrder,
    },
    config::{CatalogConfig, LogFormat, LoggingConfig},
    fixtures::{FixtureError, fallback_products},
    prices::{Price, PriceError},
    products::{Product, ProductId, SkipSize},
    receipt::{ReceiptError, write_cart, write_catalog},
};
