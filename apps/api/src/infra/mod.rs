pub mod app;
pub mod backend_client;
pub mod config;
pub mod dummy_backend;
pub mod error;
pub mod http_client;
pub mod pending_payments;
pub mod read_cache;
pub mod setup;
