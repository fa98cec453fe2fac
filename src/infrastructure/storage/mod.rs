// Key-value store adapter
// Whole collections are persisted as JSON strings under fixed keys

pub mod collection;
pub mod file;
pub mod memory;

pub use collection::JsonCollection;
pub use crate::domain::errors::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the product collection
pub const PRODUCTS_KEY: &str = "products";
/// Key holding the purchase collection
pub const PURCHASES_KEY: &str = "purchases";
/// Key holding the logged-in user
pub const USER_KEY: &str = "user";
/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// String-keyed persistent storage area
///
/// Values are raw strings; a missing key is reported as `Ok(None)`, never as
/// an error. Callers read-modify-write whole values under a single-writer
/// assumption.
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value stored under `key`
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
