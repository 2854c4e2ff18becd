//! SQLite implementations of the wonfolio-core repository traits.
//!
//! Collections live in one database file: `transactions` keyed by id,
//! `ticker_map` keyed by name, `portfolios` keyed by id. Every repository
//! exposes the same four operations: get-all, put-all (upsert by key),
//! delete-by-key, clear-all.

pub mod db;
mod errors;
mod portfolios_repository;
mod ticker_map_repository;
mod transactions_repository;

pub use db::{establish_connection, run_migrations};
pub use portfolios_repository::PortfolioRepository;
pub use ticker_map_repository::TickerMapRepository;
pub use transactions_repository::TransactionRepository;
