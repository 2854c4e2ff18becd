//! Canonical transaction records, storage traits and the orchestration
//! service between ingestion and persistence.

pub mod transactions_constants;
mod transactions_model;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::*;
pub use transactions_service::*;
pub use transactions_traits::*;
