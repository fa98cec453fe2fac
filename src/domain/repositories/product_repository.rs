use crate::domain::product::{NewProduct, Product, ProductStats, ProductUpdate};
use crate::domain::errors::StorageResult;

/// Repository trait for the product catalog
///
/// Operations are synchronous and run to completion; each mutation reads
/// the whole collection, changes it and writes it back in one store write.
pub trait ProductRepository: Send + Sync {
    /// Creates the empty collection if it does not exist yet (idempotent)
    fn initialize(&self) -> StorageResult<()>;

    /// All products in insertion order; empty if never initialized
    fn get_all(&self) -> StorageResult<Vec<Product>>;

    /// Stores a new product with a fresh id and creation timestamp
    fn add(&self, product: NewProduct) -> StorageResult<Product>;

    /// Removes the product with `id`
    ///
    /// Returns `false` when nothing matched; that is not an error.
    fn delete(&self, id: &str) -> StorageResult<bool>;

    /// Merges `update` into the product with `id`
    ///
    /// Returns `None` when no product matches.
    fn update(&self, id: &str, update: &ProductUpdate) -> StorageResult<Option<Product>>;

    /// Count and total value, recomputed on every call
    fn stats(&self) -> StorageResult<ProductStats> {
        Ok(ProductStats::compute(&self.get_all()?))
    }
}
