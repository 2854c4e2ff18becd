//! Average-cost holdings aggregation.
//!
//! Replays the complete, date-sorted transaction history into per-instrument
//! aggregates. Every recompute is a full replay; incremental updates are
//! error-prone around position closes and deliberately not attempted.

use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;

use super::holdings_model::Holding;
use crate::transactions::{Transaction, TxType};

/// Builds per-instrument holdings from the full transaction set.
///
/// Transactions are processed in non-decreasing date order (undated rows
/// first, ties keep input order - average-cost accounting is
/// order-dependent). Holdings are keyed by ticker when present, else by
/// name, so unresolved instruments are tracked per distinct name.
///
/// Never fails: degenerate input produces degenerate-but-defined aggregates.
pub fn build_holdings(transactions: &[Transaction]) -> HashMap<String, Holding> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|tx| tx.date);

    let mut holdings: HashMap<String, Holding> = HashMap::new();

    for tx in sorted {
        let key = match tx.ticker.as_deref() {
            Some(ticker) if !ticker.is_empty() => ticker.to_string(),
            _ if !tx.name.is_empty() => tx.name.clone(),
            _ => continue,
        };

        let holding = holdings
            .entry(key)
            .or_insert_with(|| Holding::from_first_transaction(tx));

        holding.transactions.push(tx.clone());
        holding.fees += tx.fee;

        match tx.tx_type {
            TxType::Buy => {
                holding.total_cost += tx.amount + tx.fee;
                holding.qty += tx.qty;
                holding.avg_cost = if holding.qty > Decimal::ZERO {
                    holding.total_cost / holding.qty
                } else {
                    Decimal::ZERO
                };
            }
            TxType::Sell => {
                // Proceeds net of costs minus the basis of the units sold at
                // the pre-sale average; oversells clamp to zero rather than
                // going negative (history may predate the first import).
                holding.realized_pnl +=
                    tx.amount - tx.fee - tx.tax - holding.avg_cost * tx.qty;
                if tx.qty > holding.qty {
                    warn!(
                        "Sell of {} exceeds tracked quantity {} for {}; clamping to zero",
                        tx.qty, holding.qty, holding.ticker
                    );
                }
                holding.qty = (holding.qty - tx.qty).max(Decimal::ZERO);
                holding.total_cost = holding.avg_cost * holding.qty;
                if holding.qty.is_zero() {
                    // Closing a position erases cost-basis memory.
                    holding.avg_cost = Decimal::ZERO;
                    holding.total_cost = Decimal::ZERO;
                }
                holding.last_sell_date = tx.date;
            }
            TxType::Dividend => {
                holding.dividends += tx.amount;
            }
            TxType::Fee => {
                // A stand-alone fee event re-inflates average cost across the
                // current position.
                holding.total_cost += tx.amount;
                if holding.qty > Decimal::ZERO {
                    holding.avg_cost = holding.total_cost / holding.qty;
                }
            }
            // Cash-level events with no per-instrument effect in this model.
            TxType::Deposit
            | TxType::Withdrawal
            | TxType::Tax
            | TxType::Interest
            | TxType::MergerSplit => {}
        }

        if !tx.fx_rate.is_zero() {
            holding.fx_rate = tx.fx_rate;
        }
    }

    holdings
}
