use chrono::Utc;
use std::sync::Arc;

use super::new_id;
use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::domain::repositories::ProductRepository;
use crate::infrastructure::storage::{JsonCollection, KeyValueStore, StorageResult, PRODUCTS_KEY};

/// ProductRepository persisted as one JSON array under `products`
#[derive(Clone)]
pub struct StoredProductRepository {
    products: JsonCollection<Product>,
}

impl StoredProductRepository {
    /// Creates a repository over `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            products: JsonCollection::new(store, PRODUCTS_KEY),
        }
    }
}

impl ProductRepository for StoredProductRepository {
    fn initialize(&self) -> StorageResult<()> {
        self.products.initialize()
    }

    fn get_all(&self) -> StorageResult<Vec<Product>> {
        self.products.load()
    }

    fn add(&self, product: NewProduct) -> StorageResult<Product> {
        let mut products = self.products.load()?;
        let created = Product {
            id: new_id(),
            name: product.name().to_string(),
            price: product.price(),
            created_at: Utc::now(),
        };
        products.push(created.clone());
        self.products.save(&products)?;

        tracing::info!(product_id = %created.id, "Product added");
        Ok(created)
    }

    fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut products = self.products.load()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            tracing::debug!(product_id = %id, "Delete ignored, no such product");
            return Ok(false);
        }
        self.products.save(&products)?;

        tracing::info!(product_id = %id, "Product deleted");
        Ok(true)
    }

    fn update(&self, id: &str, update: &ProductUpdate) -> StorageResult<Option<Product>> {
        let mut products = self.products.load()?;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        update.apply_to(product);
        let updated = product.clone();
        self.products.save(&products)?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStore;
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn repo() -> StoredProductRepository {
        StoredProductRepository::new(Arc::new(MemoryStore::new()))
    }

    fn draft(name: &str, cents: i64) -> NewProduct {
        NewProduct::new(name, Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn uninitialized_catalog_is_empty() {
        assert!(repo().get_all().unwrap().is_empty());
    }

    #[test]
    fn add_then_get_all_contains_exact_values() {
        let repo = repo();
        let created = repo.add(draft("Keyboard", 4999)).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all, vec![created.clone()]);
        assert_eq!(all[0].name, "Keyboard");
        assert_eq!(all[0].price, Decimal::new(4999, 2));
    }

    #[test]
    fn stored_price_matches_supplied_price() {
        let repo = repo();
        assert!(NewProduct::parse("X", "0.1000000000000000000000001").is_err());

        let created = repo.add(NewProduct::parse("X", "0.1").unwrap()).unwrap();
        assert_eq!(repo.get_all().unwrap(), vec![created]);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let repo = repo();
        for name in ["a", "b", "c"] {
            repo.add(draft(name, 100)).unwrap();
        }
        let names: Vec<String> = repo.get_all().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn rapid_adds_get_unique_ids() {
        let repo = repo();
        for i in 0..50 {
            repo.add(draft("item", 100 + i)).unwrap();
        }
        let ids: HashSet<String> = repo.get_all().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn delete_removes_only_matching_product() {
        let repo = repo();
        let a = repo.add(draft("a", 100)).unwrap();
        let b = repo.add(draft("b", 200)).unwrap();

        assert!(repo.delete(&a.id).unwrap());
        assert_eq!(repo.get_all().unwrap(), vec![b]);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let repo = repo();
        repo.add(draft("a", 100)).unwrap();
        let before = repo.get_all().unwrap();

        assert!(!repo.delete("missing").unwrap());
        assert_eq!(repo.get_all().unwrap(), before);
    }

    #[test]
    fn update_merges_fields() {
        let repo = repo();
        let created = repo.add(draft("Mouse", 1999)).unwrap();
        let update = ProductUpdate::new().with_name("Gaming mouse").unwrap();

        let updated = repo.update(&created.id, &update).unwrap().unwrap();
        assert_eq!(updated.name, "Gaming mouse");
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(repo.get_all().unwrap(), vec![updated]);
    }

    #[test]
    fn update_unknown_id_returns_none() {
        let repo = repo();
        let update = ProductUpdate::new().with_price(Decimal::ONE).unwrap();
        assert_eq!(repo.update("missing", &update).unwrap(), None);
    }

    #[test]
    fn stats_follow_mutations() {
        let repo = repo();
        let a = repo.add(draft("a", 1050)).unwrap();
        repo.add(draft("b", 250)).unwrap();

        let stats = repo.stats().unwrap();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.total_value, Decimal::new(1300, 2));

        repo.delete(&a.id).unwrap();
        assert_eq!(repo.stats().unwrap().total_value, Decimal::new(250, 2));
    }

    #[test]
    fn initialize_is_idempotent_and_keeps_data() {
        let repo = repo();
        repo.initialize().unwrap();
        repo.add(draft("a", 100)).unwrap();
        repo.initialize().unwrap();
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }
}
