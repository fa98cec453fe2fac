// Infrastructure layer module
// Storage adapters, repository implementations and the HTTP client
// Follows Hexagonal Architecture

pub mod http;
pub mod repositories;
pub mod storage;
