use crate::domain::purchase::{
    sort_by_date_desc, NewPurchase, ProductPurchaseStats, Purchase, PurchaseStats,
};
use crate::domain::errors::StorageResult;

/// Repository trait for recorded purchases
pub trait PurchaseRepository: Send + Sync {
    /// Creates the empty collection if it does not exist yet (idempotent)
    fn initialize(&self) -> StorageResult<()>;

    /// All purchases in insertion order
    fn get_all(&self) -> StorageResult<Vec<Purchase>>;

    /// Stores a new purchase with a fresh id; `created_at` is the current instant
    fn add(&self, purchase: NewPurchase) -> StorageResult<Purchase>;

    /// Removes the purchase with `id`, returning whether one was removed
    fn delete(&self, id: &str) -> StorageResult<bool>;

    /// All purchases, most recent purchase date first (stable on ties)
    fn get_sorted(&self) -> StorageResult<Vec<Purchase>> {
        let mut purchases = self.get_all()?;
        sort_by_date_desc(&mut purchases);
        Ok(purchases)
    }

    fn stats(&self) -> StorageResult<PurchaseStats> {
        Ok(PurchaseStats::compute(&self.get_all()?))
    }

    fn product_stats(&self) -> StorageResult<Vec<ProductPurchaseStats>> {
        Ok(ProductPurchaseStats::compute(&self.get_all()?))
    }
}
