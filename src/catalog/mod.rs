//! Catalog
//!
//! The products available in a session, plus the filter and sort used to
//! present them.

use std::cmp::Ordering;

use clap::ValueEnum;

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

pub mod loader;
pub mod records;

pub use loader::{
    CatalogError, CatalogLoader, FallbackCatalogLoader, FixtureCatalogLoader, HttpCatalogLoader,
};

/// Which products to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Only show skips that accept heavy waste
    pub heavy_waste_only: bool,

    /// Hide skips that are not allowed on the road
    pub hide_not_allowed_on_road: bool,

    /// Inclusive lower price bound
    pub min_price: Option<Price>,

    /// Inclusive upper price bound
    pub max_price: Option<Price>,
}

impl CatalogFilter {
    /// Whether `product` passes every enabled condition.
    pub fn matches(&self, product: &Product) -> bool {
        let heavy_waste = !self.heavy_waste_only || product.allows_heavy_waste;
        let road = !self.hide_not_allowed_on_road || product.allowed_on_road;
        let min = self.min_price.is_none_or(|min| product.current_price >= min);
        let max = self.max_price.is_none_or(|max| product.current_price <= max);

        heavy_waste && road && min && max
    }
}

/// Field used to order the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Skip size: numeric sizes by value, labels as case-insensitive text
    #[default]
    Name,

    /// Current price
    Price,

    /// Hire period length
    HirePeriod,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Asc,

    /// Largest first
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Catalog ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    /// Field to sort on
    pub key: SortKey,

    /// Direction
    pub order: SortOrder,
}

impl Sort {
    /// Sort on `key` ascending.
    pub fn by(key: SortKey) -> Self {
        Sort {
            key,
            order: SortOrder::Asc,
        }
    }

    /// Selecting the current key flips the direction; a new key starts ascending.
    #[must_use]
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Sort {
                key,
                order: self.order.reversed(),
            }
        } else {
            Sort::by(key)
        }
    }

    /// Compare two products under this ordering.
    pub fn compare(&self, left: &Product, right: &Product) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => left.size.display_cmp(&right.size),
            SortKey::Price => left.current_price.cmp(&right.current_price),
            SortKey::HirePeriod => left.hire_period_days.cmp(&right.hire_period_days),
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Products loaded for a session, in the order the loader returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap a loaded product list.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Find a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// All products, unfiltered.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products passing `filter`, ordered by `sort`. Ties keep catalog order.
    pub fn view(&self, filter: &CatalogFilter, sort: Sort) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| filter.matches(product))
            .collect();

        products.sort_by(|left, right| sort.compare(left, right));

        products
    }
}
