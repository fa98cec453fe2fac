use chrono::Utc;
use std::sync::Arc;

use super::new_id;
use crate::domain::purchase::{NewPurchase, Purchase};
use crate::domain::repositories::PurchaseRepository;
use crate::infrastructure::storage::{
    JsonCollection, KeyValueStore, StorageResult, PURCHASES_KEY,
};

/// PurchaseRepository persisted as one JSON array under `purchases`
#[derive(Clone)]
pub struct StoredPurchaseRepository {
    purchases: JsonCollection<Purchase>,
}

impl StoredPurchaseRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            purchases: JsonCollection::new(store, PURCHASES_KEY),
        }
    }
}

impl PurchaseRepository for StoredPurchaseRepository {
    fn initialize(&self) -> StorageResult<()> {
        self.purchases.initialize()
    }

    fn get_all(&self) -> StorageResult<Vec<Purchase>> {
        self.purchases.load()
    }

    fn add(&self, purchase: NewPurchase) -> StorageResult<Purchase> {
        let mut purchases = self.purchases.load()?;
        let created = Purchase {
            id: new_id(),
            product_name: purchase.product_name().to_string(),
            price: purchase.price(),
            purchase_date: purchase.purchase_date(),
            created_at: Utc::now(),
        };
        purchases.push(created.clone());
        self.purchases.save(&purchases)?;

        tracing::info!(purchase_id = %created.id, "Purchase recorded");
        Ok(created)
    }

    fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut purchases = self.purchases.load()?;
        let before = purchases.len();
        purchases.retain(|p| p.id != id);
        if purchases.len() == before {
            return Ok(false);
        }
        self.purchases.save(&purchases)?;

        tracing::info!(purchase_id = %id, "Purchase deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{KeyValueStore, MemoryStore};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn repo() -> (Arc<MemoryStore>, StoredPurchaseRepository) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), StoredPurchaseRepository::new(store))
    }

    fn draft(name: &str, price: i64, date: &str) -> NewPurchase {
        NewPurchase::new(
            name,
            Decimal::new(price, 0),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn add_assigns_id_and_creation_time() {
        let (_, repo) = repo();
        let before = Utc::now();
        let created = repo.add(draft("Coffee", 4, "2024-01-01")).unwrap();

        assert!(!created.id.is_empty());
        assert!(created.created_at >= before);
        assert_eq!(repo.get_all().unwrap(), vec![created]);
    }

    #[test]
    fn sorted_purchases_are_date_descending() {
        let (_, repo) = repo();
        for date in ["2024-01-01", "2024-03-01", "2024-02-01"] {
            repo.add(draft("X", 1, date)).unwrap();
        }

        let dates: Vec<String> = repo
            .get_sorted()
            .unwrap()
            .iter()
            .map(|p| p.purchase_date.to_string())
            .collect();
        assert_eq!(dates, ["2024-03-01", "2024-02-01", "2024-01-01"]);

        // stored order is untouched
        let stored: Vec<String> = repo
            .get_all()
            .unwrap()
            .iter()
            .map(|p| p.purchase_date.to_string())
            .collect();
        assert_eq!(stored, ["2024-01-01", "2024-03-01", "2024-02-01"]);
    }

    #[test]
    fn stats_over_stored_purchases() {
        let (_, repo) = repo();
        repo.add(draft("A", 10, "2024-01-01")).unwrap();
        repo.add(draft("A", 5, "2024-01-02")).unwrap();
        repo.add(draft("B", 7, "2024-01-03")).unwrap();

        let stats = repo.stats().unwrap();
        assert_eq!(stats.total_spent, Decimal::new(22, 0));
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.top_product.as_deref(), Some("A"));
        assert_eq!(stats.top_product_count, 2);

        let per_product = repo.product_stats().unwrap();
        assert_eq!(per_product.len(), 2);
        assert_eq!(per_product[0].name, "A");
        assert_eq!(per_product[0].total_spent, Decimal::new(15, 0));
    }

    #[test]
    fn delete_unknown_id_leaves_collection_unchanged() {
        let (store, repo) = repo();
        repo.add(draft("A", 1, "2024-01-01")).unwrap();
        let raw_before = store.read(PURCHASES_KEY).unwrap();

        assert!(!repo.delete("missing").unwrap());
        assert_eq!(store.read(PURCHASES_KEY).unwrap(), raw_before);
    }

    #[test]
    fn corrupt_collection_is_an_error_not_empty() {
        let (store, repo) = repo();
        store.write(PURCHASES_KEY, "not json").unwrap();
        assert!(repo.get_all().is_err());
        assert!(repo.add(draft("A", 1, "2024-01-01")).is_err());
        assert_eq!(store.read(PURCHASES_KEY).unwrap().as_deref(), Some("not json"));
    }
}
