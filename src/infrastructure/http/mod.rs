// HTTP adapter for the REST API

pub mod client;

pub use client::ApiClient;
