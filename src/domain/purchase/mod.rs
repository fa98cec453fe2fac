// Purchase domain module
// Purchase entity, validated inputs, ordering and spending statistics

#![allow(clippy::module_inception)]

pub mod purchase;
pub mod stats;

pub use purchase::{parse_purchase_date, NewPurchase, Purchase, PURCHASE_DATE_FORMAT};
pub use stats::{sort_by_date_desc, ProductPurchaseStats, PurchaseStats};
