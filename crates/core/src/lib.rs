//! Wonfolio Core - statement ingestion and portfolio accounting.
//!
//! This crate turns heterogeneous brokerage statement exports (Korean HTS
//! dumps, clipboard TSV/CSV) into canonical transactions and replays the
//! transaction history into average-cost holdings. It is database-agnostic
//! and defines traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod holdings;
pub mod ingest;
pub mod transactions;

pub use holdings::{build_holdings, Holding};
pub use ingest::{process_raw_data, ImportOutcome, StatementImport};
pub use transactions::{AssetClass, Transaction, TxType, UnmappedName};

pub use errors::Error;
pub use errors::Result;
