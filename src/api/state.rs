use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::{TokenSigner, UserDirectory};
use crate::domain::repositories::{ProductRepository, PurchaseRepository};
use crate::infrastructure::repositories::{StoredProductRepository, StoredPurchaseRepository};
use crate::infrastructure::storage::{KeyValueStore, StorageResult};

/// Shared state handed to every handler
///
/// Each repository sits behind an async mutex: its read-modify-write cycle
/// is only safe with a single writer, so requests take turns.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<Mutex<StoredProductRepository>>,
    pub purchases: Arc<Mutex<StoredPurchaseRepository>>,
    pub users: Arc<UserDirectory>,
    pub signer: TokenSigner,
}

impl AppState {
    /// Builds the state and initializes both collections (idempotent)
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        users: Arc<UserDirectory>,
        signer: TokenSigner,
    ) -> StorageResult<Self> {
        let products = StoredProductRepository::new(Arc::clone(&store));
        let purchases = StoredPurchaseRepository::new(store);
        products.initialize()?;
        purchases.initialize()?;

        Ok(Self {
            products: Arc::new(Mutex::new(products)),
            purchases: Arc::new(Mutex::new(purchases)),
            users,
            signer,
        })
    }
}
