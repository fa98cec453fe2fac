use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;
use crate::domain::money::Price;

/// A catalog product as persisted under the `products` key
///
/// # Invariants
/// - `id` is unique within the collection
/// - `price` is never negative (enforced on input, see [`NewProduct`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(with = "crate::domain::money::as_number")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a product
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use storefront_dashboard::domain::product::NewProduct;
///
/// let draft = NewProduct::new("Keyboard", Decimal::new(4999, 2)).expect("valid product");
/// assert_eq!(draft.name(), "Keyboard");
/// assert!(NewProduct::new("  ", Decimal::ONE).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    price: Price,
}

impl NewProduct {
    /// Validates a name and price
    ///
    /// # Validation Rules
    /// - Name must not be blank (surrounding whitespace is trimmed)
    /// - Price must be strictly positive
    pub fn new(name: &str, price: Decimal) -> Result<Self, ValidationError> {
        Self::combine(product_name(name), Price::new(price))
    }

    /// Validates raw form values (price as typed by the user)
    pub fn parse(name: &str, price: &str) -> Result<Self, ValidationError> {
        Self::combine(product_name(name), Price::parse(price))
    }

    fn combine(
        name: Result<String, ValidationError>,
        price: Result<Price, ValidationError>,
    ) -> Result<Self, ValidationError> {
        match (name, price) {
            (Ok(name), Ok(price)) => Ok(Self { name, price }),
            (name, price) => {
                let mut errors = ValidationError::default();
                for err in [name.err(), price.err()].into_iter().flatten() {
                    errors.details.extend(err.details);
                }
                Err(errors)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price.amount()
    }
}

/// Validated partial update for a product
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    name: Option<String>,
    price: Option<Price>,
}

impl ProductUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str) -> Result<Self, ValidationError> {
        self.name = Some(product_name(name)?);
        Ok(self)
    }

    pub fn with_price(mut self, price: Decimal) -> Result<Self, ValidationError> {
        self.price = Some(Price::new(price)?);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    /// Merges the present fields into `product`
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price.amount();
        }
    }
}

fn product_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::field("name", "Product name is required"));
    }
    Ok(name.to_string())
}
