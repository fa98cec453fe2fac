use rust_decimal::Decimal;
use serde::Serialize;

use super::Product;

/// Aggregate figures over the whole product catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    #[serde(with = "crate::domain::money::as_number")]
    pub total_value: Decimal,
}

impl ProductStats {
    /// Full scan over `products`; nothing is cached
    pub fn compute(products: &[Product]) -> Self {
        Self {
            total_products: products.len(),
            total_value: products.iter().map(|p| p.price).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, price: Decimal) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            price,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_catalog() {
        let stats = ProductStats::compute(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_value, Decimal::ZERO);
    }

    #[test]
    fn sums_prices_exactly() {
        let stats = ProductStats::compute(&[
            product("a", Decimal::new(10, 1)),
            product("b", Decimal::new(20, 1)),
        ]);
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.total_value, Decimal::new(30, 1));
    }
}
