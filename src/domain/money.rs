use rust_decimal::Decimal;
use std::fmt;

use super::errors::ValidationError;

/// Strictly positive monetary amount accepted from user input
///
/// Persisted entities hold a plain `Decimal`; this type exists so that
/// repositories only ever receive prices that passed input validation.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use storefront_dashboard::domain::money::Price;
///
/// let price = Price::new(Decimal::new(1999, 2)).expect("valid price");
/// assert_eq!(price.amount(), Decimal::new(1999, 2));
/// assert!(Price::new(Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// Accepts a strictly positive amount that is stored without rounding
    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::field("price", "Price must be a positive number"));
        }
        if as_number::to_stored(amount) != Some(amount) {
            return Err(ValidationError::field("price", "Price has too many digits"));
        }
        Ok(Self(amount))
    }

    /// Parses a form value such as `"49.99"`
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::field("price", "Price is required"));
        }
        let amount: Decimal = raw
            .parse()
            .map_err(|_| ValidationError::field("price", "Price must be a positive number"))?;
        Self::new(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Serde adapter writing a `Decimal` as a plain JSON number
///
/// The value goes through its shortest decimal text, so `19.99` is stored
/// as `19.99` and reads back as exactly `19.99`.
pub mod as_number {
    use rust_decimal::Decimal;
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let number: f64 = value.to_string().parse().map_err(ser::Error::custom)?;
        serializer.serialize_f64(number)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let number = f64::deserialize(deserializer)?;
        from_number(number).map_err(de::Error::custom)
    }

    /// The value `value` reads back as after a write and a read
    pub fn to_stored(value: Decimal) -> Option<Decimal> {
        let number: f64 = value.to_string().parse().ok()?;
        from_number(number).ok()
    }

    fn from_number(number: f64) -> Result<Decimal, String> {
        if !number.is_finite() {
            return Err("price must be a finite number".to_string());
        }
        Decimal::from_str(&number.to_string()).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_price_is_accepted() {
        assert!(Price::new(Decimal::new(1, 2)).is_ok());
    }

    #[test]
    fn zero_and_negative_are_rejected() {
        assert!(Price::new(Decimal::ZERO).is_err());
        assert!(Price::new(Decimal::new(-5, 0)).is_err());
    }

    #[test]
    fn parse_form_value() {
        let price = Price::parse(" 49.99 ").unwrap();
        assert_eq!(price.amount(), Decimal::new(4999, 2));
    }

    #[test]
    fn parse_rejects_blank_and_garbage() {
        assert_eq!(
            Price::parse("").unwrap_err().message_for("price"),
            Some("Price is required")
        );
        assert!(Price::parse("abc").is_err());
        assert!(Price::parse("-1").is_err());
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Priced {
        #[serde(with = "as_number")]
        price: Decimal,
    }

    #[test]
    fn as_number_round_trips_exactly() {
        let raw = serde_json::to_string(&Priced {
            price: Decimal::new(1999, 2),
        })
        .unwrap();
        assert_eq!(raw, r#"{"price":19.99}"#);

        let back: Priced = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.price, Decimal::new(1999, 2));
    }

    #[test]
    fn as_number_accepts_integers() {
        let back: Priced = serde_json::from_str(r#"{"price":7}"#).unwrap();
        assert_eq!(back.price, Decimal::new(7, 0));
    }

    #[test]
    fn amounts_that_would_be_rounded_on_storage_are_rejected() {
        let err = Price::parse("0.1000000000000000000000001").unwrap_err();
        assert_eq!(err.message_for("price"), Some("Price has too many digits"));
        assert!(Price::parse("12345678901234567890.5").is_err());
    }

    #[test]
    fn every_accepted_amount_reads_back_unchanged() {
        for raw in ["0.01", "19.99", "49.99", "120.5", "1000000", "0.1", "3.333"] {
            let price = Price::parse(raw).unwrap();
            let json = serde_json::to_string(&Priced {
                price: price.amount(),
            })
            .unwrap();
            let back: Priced = serde_json::from_str(&json).unwrap();
            assert_eq!(back.price, price.amount(), "{} changed on storage", raw);
        }
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Price::new(Decimal::new(5, 0)).unwrap().to_string(), "5.00");
    }
}
