//! Products

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Image shown when a product has no usable picture.
pub const DEFAULT_IMAGE_URL: &str = "/skips/40-yarder-skip.png";

/// Product identifier, unique within a catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        ProductId(value)
    }
}

/// Skip size as sent by the API; older payloads use numbers, newer ones text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SkipSize {
    /// Numeric size in yards
    Yards(u64),

    /// Free-form size label
    Label(String),
}

impl SkipSize {
    /// Display ordering: numeric sizes compare as numbers, anything else as
    /// case-insensitive text.
    pub fn display_cmp(&self, other: &SkipSize) -> Ordering {
        match (self, other) {
            (SkipSize::Yards(left), SkipSize::Yards(right)) => left.cmp(right),
            _ => self
                .to_string()
                .to_lowercase()
                .cmp(&other.to_string().to_lowercase()),
        }
    }
}

impl fmt::Display for SkipSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipSize::Yards(yards) => write!(f, "{yards}"),
            SkipSize::Label(label) => f.write_str(label),
        }
    }
}

/// A skip container offered for hire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name (the skip size in yards)
    pub name: String,

    /// Size the name was derived from; used for ordering
    pub size: SkipSize,

    /// Path to the product picture
    pub image_url: String,

    /// Hire price before VAT
    pub current_price: Price,

    /// Whether the skip may be placed on a public road
    pub allowed_on_road: bool,

    /// Whether the skip accepts heavy waste
    pub allows_heavy_waste: bool,

    /// Length of the hire period in days
    pub hire_period_days: u32,

    /// VAT associated with the product; displayed, never summed
    pub vat: Price,
}

impl Product {
    /// Image path for a skip of the given size.
    pub fn image_url_for(size: &str) -> String {
        format!("/skips/{size}-yarder-skip.png")
    }

    /// The product image, or [`DEFAULT_IMAGE_URL`] when none is set.
    pub fn image_or_default(&self) -> &str {
        if self.image_url.trim().is_empty() {
            DEFAULT_IMAGE_URL
        } else {
            &self.image_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip(image_url: &str) -> Product {
        Product {
            id: ProductId(17_933),
            name: "4".to_string(),
            size: SkipSize::Yards(4),
            image_url: image_url.to_string(),
            current_price: Price::new(27_800),
            allowed_on_road: true,
            allows_heavy_waste: true,
            hire_period_days: 14,
            vat: Price::new(2_000),
        }
    }

    #[test]
    fn image_url_for_uses_yarder_path() {
        assert_eq!(Product::image_url_for("6"), "/skips/6-yarder-skip.png");
    }

    #[test]
    fn image_or_default_falls_back_when_blank() {
        assert_eq!(skip("").image_or_default(), DEFAULT_IMAGE_URL);
        assert_eq!(
            skip("/skips/4-yarder-skip.png").image_or_default(),
            "/skips/4-yarder-skip.png"
        );
    }

    #[test]
    fn product_id_displays_inner_value() {
        assert_eq!(ProductId(15_124).to_string(), "15124");
    }

    #[test]
    fn numeric_sizes_order_as_numbers() {
        assert_eq!(
            SkipSize::Yards(4).display_cmp(&SkipSize::Yards(10)),
            Ordering::Less
        );
        assert_eq!(
            SkipSize::Label("Maxi".to_string()).display_cmp(&SkipSize::Label("midi".to_string())),
            Ordering::Less
        );
        assert_eq!(
            SkipSize::Label("10".to_string()).display_cmp(&SkipSize::Label("4".to_string())),
            Ordering::Less
        );
    }
}
