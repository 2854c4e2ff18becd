use std::collections::HashMap;

use super::transactions_model::{Portfolio, TickerMapping, Transaction};
use crate::holdings::Holding;
use crate::ingest::ImportOutcome;
use crate::Result;

/// Storage contract for the transaction collection, keyed by id.
///
/// The storage layer exposes the same four operations for every collection:
/// fetch-all, upsert-all (merge by key), delete-by-key, clear-all.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_all(&self) -> Result<Vec<Transaction>>;
    fn put_all(&self, transactions: &[Transaction]) -> Result<()>;
    fn delete(&self, id: i64) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Storage contract for the persisted name → ticker map, keyed by name.
pub trait TickerMapRepositoryTrait: Send + Sync {
    fn get_all(&self) -> Result<Vec<TickerMapping>>;
    fn put_all(&self, mappings: &[TickerMapping]) -> Result<()>;
    fn delete(&self, name: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Storage contract for user-defined portfolios, keyed by id.
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get_all(&self) -> Result<Vec<Portfolio>>;
    fn put_all(&self, portfolios: &[Portfolio]) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Orchestration surface between the ingestion pipeline, the storage layer
/// and the UI.
pub trait TransactionServiceTrait: Send + Sync {
    /// Ingests one raw table under the given account label and persists the
    /// resulting batch.
    fn import_statement(&self, raw_rows: &[Vec<String>], account_label: &str)
        -> Result<ImportOutcome>;

    /// Convenience wrapper: decodes pasted statement text first.
    fn import_statement_text(&self, text: &str, account_label: &str) -> Result<ImportOutcome>;

    /// Persists a user-supplied name → ticker mapping and backfills every
    /// stored transaction with that name and no ticker, ids preserved.
    /// Returns the number of transactions updated.
    fn resolve_ticker(&self, name: &str, ticker: &str) -> Result<usize>;

    fn get_transactions(&self) -> Result<Vec<Transaction>>;
    fn delete_transaction(&self, id: i64) -> Result<()>;
    fn clear_transactions(&self) -> Result<()>;

    /// Rebuilds holdings from the full persisted transaction set.
    fn holdings(&self) -> Result<HashMap<String, Holding>>;
}
