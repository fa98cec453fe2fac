// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces over a KeyValueStore

pub mod stored_product_repository;
pub mod stored_purchase_repository;

pub use stored_product_repository::StoredProductRepository;
pub use stored_purchase_repository::StoredPurchaseRepository;

/// Fresh entity identifier
///
/// UUIDv7 is time-ordered like a creation timestamp but stays unique for
/// entities created within the same millisecond.
pub(crate) fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
