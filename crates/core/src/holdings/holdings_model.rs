use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::{AssetClass, Transaction};

/// Per-instrument aggregate derived from the full transaction history.
///
/// Holdings are pure derived state: rebuilt from scratch on every recompute,
/// never incrementally patched, and carry no identity of their own. Market
/// price is deliberately absent; the display layer joins it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub name: String,
    pub currency: String,
    /// Current open quantity, never negative.
    pub qty: Decimal,
    /// Weighted average cost per unit of the currently open quantity.
    pub avg_cost: Decimal,
    pub total_cost: Decimal,
    /// Cumulative, across all historical sells.
    #[serde(rename = "realizedPnL")]
    pub realized_pnl: Decimal,
    pub dividends: Decimal,
    /// Cumulative fees across all contributing transactions, informational.
    pub fees: Decimal,
    /// Last non-zero statement fx-rate seen for this instrument.
    pub fx_rate: Decimal,
    pub asset_class: AssetClass,
    /// All contributing transactions, for drill-down.
    pub transactions: Vec<Transaction>,
    pub last_sell_date: Option<NaiveDate>,
}

impl Holding {
    /// Initializes an empty holding from the first transaction seen for its
    /// key.
    pub(crate) fn from_first_transaction(tx: &Transaction) -> Self {
        let ticker = tx.ticker.clone().unwrap_or_else(|| tx.name.clone());
        let name = if tx.name.is_empty() {
            ticker.clone()
        } else {
            tx.name.clone()
        };
        Self {
            ticker,
            name,
            currency: tx.currency.clone(),
            qty: Decimal::ZERO,
            avg_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            realized_pnl: Decimal::ZERO,
            dividends: Decimal::ZERO,
            fees: Decimal::ZERO,
            fx_rate: if tx.fx_rate.is_zero() {
                Decimal::ONE
            } else {
                tx.fx_rate
            },
            asset_class: tx.asset_class,
            transactions: Vec::new(),
            last_sell_date: None,
        }
    }
}
