// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of transport details

pub mod errors;
pub mod money;
pub mod product;
pub mod purchase;
pub mod repositories;
pub mod user;

pub use errors::{StorageError, StorageResult, ValidationError};
