// Repository interfaces (ports)
// Implemented by the store-backed adapters in infrastructure

pub mod product_repository;
pub mod purchase_repository;

pub use product_repository::ProductRepository;
pub use purchase_repository::PurchaseRepository;
