//! Statement ingestion pipeline.
//!
//! Orchestrates header detection, row conversion, ticker backfill,
//! twin-row deduplication and id assignment for one raw table.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};

use super::column_mapper::find_header_row;
use super::dedup::deduplicate_transactions;
use super::row_converter::rows_to_transactions;
use crate::transactions::{Transaction, UnmappedName};

/// Built-in name → ticker table for globally recognized instruments, used as
/// a last resort after the user's persisted cache.
const FALLBACK_TICKERS: &[(&str, &str)] = &[
    ("삼성전자", "005930"),
    ("삼성전자우", "005935"),
    ("SK하이닉스", "000660"),
    ("NAVER", "035420"),
    ("카카오", "035720"),
    ("현대차", "005380"),
    ("애플", "AAPL"),
    ("마이크로소프트", "MSFT"),
    ("엔비디아", "NVDA"),
    ("테슬라", "TSLA"),
    ("알파벳", "GOOGL"),
    ("아마존닷컴", "AMZN"),
];

fn fallback_ticker(name: &str) -> Option<&'static str> {
    FALLBACK_TICKERS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, ticker)| *ticker)
}

/// A successfully ingested statement batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementImport {
    pub transactions: Vec<Transaction>,
    pub unmapped_names: Vec<UnmappedName>,
}

/// Outcome of one ingestion call. Schema recognition failure is a value, not
/// an error: the caller shows a message and takes no further action.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported(StatementImport),
    UnrecognizedFormat,
}

/// Runs the full ingestion pipeline over one raw table.
///
/// The header row is located by scanning the leading rows and scoring each as
/// a mapping candidate; everything after it is data. Transactions whose
/// ticker is still unresolved after conversion are backfilled from the cache
/// and the built-in fallback table, twin rows are merged, and batch-local ids
/// are assigned last so they are stable across the surviving records.
pub fn process_raw_data(
    raw_rows: &[Vec<String>],
    ticker_cache: &HashMap<String, String>,
    account_label: &str,
) -> ImportOutcome {
    let Some((header_index, col_map)) = find_header_row(raw_rows) else {
        return ImportOutcome::UnrecognizedFormat;
    };

    let data_rows: Vec<Vec<String>> = raw_rows[header_index + 1..]
        .iter()
        .filter(|row| !row.iter().all(|cell| cell.trim().is_empty()))
        .cloned()
        .collect();

    let (mut transactions, mut unmapped) =
        rows_to_transactions(&data_rows, &col_map, ticker_cache, account_label);

    // Backfill pass: the cache may have grown since conversion, and a few
    // well-known names resolve without the user's help.
    let mut resolved: HashSet<String> = HashSet::new();
    for tx in transactions.iter_mut() {
        if tx.ticker.is_some() || tx.name.is_empty() {
            continue;
        }
        let backfilled = ticker_cache
            .get(&tx.name)
            .map(String::as_str)
            .or_else(|| fallback_ticker(&tx.name));
        if let Some(ticker) = backfilled {
            tx.ticker = Some(ticker.to_string());
            resolved.insert(tx.name.clone());
        }
    }
    unmapped.retain(|entry| !resolved.contains(&entry.name));

    let transactions = deduplicate_transactions(transactions);

    // Batch-local ids only; never reused as a cross-batch business key.
    let id_seed = Utc::now().timestamp_millis();
    let transactions: Vec<Transaction> = transactions
        .into_iter()
        .enumerate()
        .map(|(index, tx)| tx.into_transaction(id_seed + index as i64))
        .collect();

    debug!(
        "Ingested {} transactions ({} unmapped names)",
        transactions.len(),
        unmapped.len()
    );

    ImportOutcome::Imported(StatementImport {
        transactions,
        unmapped_names: unmapped,
    })
}
