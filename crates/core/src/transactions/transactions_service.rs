use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use super::transactions_model::{TickerMapping, Transaction};
use super::transactions_traits::{
    TickerMapRepositoryTrait, TransactionRepositoryTrait, TransactionServiceTrait,
};
use crate::errors::{Error, ValidationError};
use crate::holdings::{build_holdings, Holding};
use crate::ingest::{parse_statement_text, process_raw_data, ImportOutcome};
use crate::Result;

/// Service owning the read-merge-write cycle between the ingestion pipeline
/// and the storage layer. The pipeline itself stays pure; every snapshot it
/// consumes is loaded here.
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ticker_map_repository: Arc<dyn TickerMapRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        ticker_map_repository: Arc<dyn TickerMapRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            ticker_map_repository,
        }
    }

    fn ticker_cache(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .ticker_map_repository
            .get_all()?
            .into_iter()
            .map(|mapping| (mapping.name, mapping.ticker))
            .collect())
    }
}

impl TransactionServiceTrait for TransactionService {
    fn import_statement(
        &self,
        raw_rows: &[Vec<String>],
        account_label: &str,
    ) -> Result<ImportOutcome> {
        let cache = self.ticker_cache()?;
        let outcome = process_raw_data(raw_rows, &cache, account_label);
        if let ImportOutcome::Imported(batch) = &outcome {
            self.transaction_repository.put_all(&batch.transactions)?;
            debug!(
                "Persisted {} transactions for account '{}'",
                batch.transactions.len(),
                account_label
            );
        }
        Ok(outcome)
    }

    fn import_statement_text(&self, text: &str, account_label: &str) -> Result<ImportOutcome> {
        let rows = parse_statement_text(text)?;
        self.import_statement(&rows, account_label)
    }

    fn resolve_ticker(&self, name: &str, ticker: &str) -> Result<usize> {
        let name = name.trim();
        let ticker = ticker.trim().to_uppercase();
        if name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if ticker.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "ticker".to_string(),
            )));
        }

        self.ticker_map_repository.put_all(&[TickerMapping {
            name: name.to_string(),
            ticker: ticker.clone(),
        }])?;

        let updated: Vec<Transaction> = self
            .transaction_repository
            .get_all()?
            .into_iter()
            .filter(|tx| tx.ticker.is_none() && tx.name == name)
            .map(|mut tx| {
                tx.ticker = Some(ticker.clone());
                tx
            })
            .collect();

        if !updated.is_empty() {
            self.transaction_repository.put_all(&updated)?;
        }
        debug!(
            "Resolved '{}' to {} across {} transactions",
            name,
            ticker,
            updated.len()
        );
        Ok(updated.len())
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        self.transaction_repository.get_all()
    }

    fn delete_transaction(&self, id: i64) -> Result<()> {
        self.transaction_repository.delete(id)
    }

    fn clear_transactions(&self) -> Result<()> {
        self.transaction_repository.clear()
    }

    fn holdings(&self) -> Result<HashMap<String, Holding>> {
        Ok(build_holdings(&self.transaction_repository.get_all()?))
    }
}
