use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;
use crate::domain::money::Price;

/// Date format used by purchase forms and the persisted `purchaseDate`
pub const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A recorded purchase as persisted under the `purchases` key
///
/// `product_name` is free text; it is not checked against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub product_name: String,
    #[serde(with = "crate::domain::money::as_number")]
    pub price: Decimal,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Validated input for recording a purchase
///
/// # Example
/// ```
/// use storefront_dashboard::domain::purchase::NewPurchase;
///
/// let draft = NewPurchase::parse("Coffee", "3.50", "2024-03-01").expect("valid purchase");
/// assert_eq!(draft.product_name(), "Coffee");
/// assert!(NewPurchase::parse("Coffee", "3.50", "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    product_name: String,
    price: Price,
    purchase_date: NaiveDate,
}

impl NewPurchase {
    pub fn new(
        product_name: &str,
        price: Decimal,
        purchase_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let product_name = required_product_name(product_name)?;
        let price = Price::new(price)?;
        Ok(Self {
            product_name,
            price,
            purchase_date,
        })
    }

    /// Validates raw form values, checking fields in form order
    ///
    /// # Validation Rules
    /// - Product name is required
    /// - Price must parse as a positive number
    /// - Purchase date is required and must be `YYYY-MM-DD`
    pub fn parse(product_name: &str, price: &str, purchase_date: &str) -> Result<Self, ValidationError> {
        let product_name = required_product_name(product_name)?;
        let price = Price::parse(price)?;
        let purchase_date = parse_purchase_date(purchase_date)?;
        Ok(Self {
            product_name,
            price,
            purchase_date,
        })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn price(&self) -> Decimal {
        self.price.amount()
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }
}

/// Parses a `YYYY-MM-DD` purchase date
pub fn parse_purchase_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::field("purchaseDate", "Purchase date is required"));
    }
    NaiveDate::parse_from_str(raw, PURCHASE_DATE_FORMAT).map_err(|_| {
        ValidationError::field("purchaseDate", "Purchase date must be formatted as YYYY-MM-DD")
    })
}

fn required_product_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::field("productName", "Product name is required"));
    }
    Ok(name.to_string())
}
