//! Catalog wire records.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    prices::{Price, PriceError},
    products::{Product, ProductId, SkipSize},
};

/// A skip as returned by the `skips/by-location` endpoint.
///
/// Fields the storefront does not use (`transport_cost`, `postcode`,
/// timestamps, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkipRecord {
    /// Skip id
    pub id: u64,

    /// Skip size in yards
    pub size: SkipSize,

    /// Hire price before VAT, in pounds
    pub price_before_vat: Decimal,

    /// Whether the skip may be placed on a public road
    pub allowed_on_road: bool,

    /// Whether the skip accepts heavy waste
    pub allows_heavy_waste: bool,

    /// Hire period in days
    pub hire_period_days: u32,

    /// VAT, in pounds; missing or null means none
    #[serde(default)]
    pub vat: Option<Decimal>,
}

impl TryFrom<SkipRecord> for Product {
    type Error = PriceError;

    fn try_from(record: SkipRecord) -> Result<Self, Self::Error> {
        let name = record.size.to_string();

        Ok(Product {
            id: ProductId(record.id),
            image_url: Product::image_url_for(&name),
            name,
            size: record.size,
            current_price: Price::from_major(record.price_before_vat)?,
            allowed_on_road: record.allowed_on_road,
            allows_heavy_waste: record.allows_heavy_waste,
            hire_period_days: record.hire_period_days,
            vat: record.vat.map(Price::from_major).transpose()?.unwrap_or(Price::ZERO),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const API_RECORD: &str = r#"{
        "id": 17933,
        "size": 4,
        "hire_period_days": 14,
        "transport_cost": null,
        "per_tonne_cost": null,
        "price_before_vat": 278,
        "vat": 20,
        "postcode": "NR32",
        "area": "",
        "forbidden": false,
        "created_at": "2025-04-03T13:51:46.897146",
        "updated_at": "2025-04-07T13:16:52.813",
        "allowed_on_road": true,
        "allows_heavy_waste": true
    }"#;

    #[test]
    fn maps_api_record_into_product() -> TestResult {
        let record: SkipRecord = serde_json::from_str(API_RECORD)?;
        let product = Product::try_from(record)?;

        assert_eq!(product.id, ProductId(17_933));
        assert_eq!(product.name, "4");
        assert_eq!(product.image_url, "/skips/4-yarder-skip.png");
        assert_eq!(product.current_price, Price::new(27_800));
        assert!(product.allowed_on_road);
        assert!(product.allows_heavy_waste);
        assert_eq!(product.hire_period_days, 14);
        assert_eq!(product.vat, Price::new(2_000));

        Ok(())
    }

    #[test]
    fn accepts_text_sizes_and_missing_vat() -> TestResult {
        let record: SkipRecord = serde_json::from_str(
            r#"{
                "id": 1,
                "size": "8",
                "price_before_vat": 374.5,
                "allowed_on_road": false,
                "allows_heavy_waste": false,
                "hire_period_days": 7
            }"#,
        )?;
        let product = Product::try_from(record)?;

        assert_eq!(product.name, "8");
        assert_eq!(product.size, SkipSize::Label("8".to_string()));
        assert_eq!(product.image_url, "/skips/8-yarder-skip.png");
        assert_eq!(product.current_price, Price::new(37_450));
        assert_eq!(product.vat, Price::ZERO);

        Ok(())
    }

    #[test]
    fn rejects_negative_prices() -> TestResult {
        let record: SkipRecord = serde_json::from_str(
            r#"{
                "id": 1,
                "size": 4,
                "price_before_vat": -5,
                "allowed_on_road": true,
                "allows_heavy_waste": true,
                "hire_period_days": 14
            }"#,
        )?;

        assert!(matches!(
            Product::try_from(record),
            Err(PriceError::Negative(_))
        ));

        Ok(())
    }
}
