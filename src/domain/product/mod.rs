// Product domain module
// Catalog entity, validated inputs and catalog statistics

#![allow(clippy::module_inception)]

pub mod product;
pub mod stats;

pub use product::{NewProduct, Product, ProductUpdate};
pub use stats::ProductStats;
