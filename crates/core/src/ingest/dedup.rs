//! Twin-row reconciliation.
//!
//! Several export formats post one economic event as two rows: the trade leg
//! and its matching cash leg (which often carries the fee). Twins are merged
//! into the trade leg so the event is counted once and no cost is lost.

use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;

use crate::constants::TWIN_AMOUNT_TOLERANCE;
use crate::transactions::NewTransaction;

fn is_twin(a: &NewTransaction, b: &NewTransaction, tolerance: Decimal) -> bool {
    a.date == b.date
        && a.name == b.name
        && (a.amount - b.amount).abs() < tolerance
        && !a.ref_id.is_empty()
        && !b.ref_id.is_empty()
        && a.ref_id == b.ref_id
}

/// Merges twin rows; output length is less than or equal to input length.
///
/// Each unconsumed row scans forward for its first unconsumed twin. The
/// member whose type is BUY or SELL survives; fee and tax become the sum of
/// both members. O(n²) worst case, fine at statement-batch scale.
pub fn deduplicate_transactions(transactions: Vec<NewTransaction>) -> Vec<NewTransaction> {
    let tolerance = Decimal::from_str(TWIN_AMOUNT_TOLERANCE).unwrap_or(Decimal::ONE);
    let mut consumed = vec![false; transactions.len()];
    let mut merged = Vec::with_capacity(transactions.len());

    for i in 0..transactions.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let mut twin_index = None;
        for j in (i + 1)..transactions.len() {
            if !consumed[j] && is_twin(&transactions[i], &transactions[j], tolerance) {
                twin_index = Some(j);
                break;
            }
        }

        match twin_index {
            Some(j) => {
                consumed[j] = true;
                let (master, slave) = if transactions[i].tx_type.is_trade() {
                    (&transactions[i], &transactions[j])
                } else {
                    (&transactions[j], &transactions[i])
                };
                debug!(
                    "Merging twin rows for {} on {:?} (ref {})",
                    master.name, master.date, master.ref_id
                );
                let mut survivor = master.clone();
                survivor.fee = master.fee + slave.fee;
                survivor.tax = master.tax + slave.tax;
                merged.push(survivor);
            }
            None => merged.push(transactions[i].clone()),
        }
    }

    merged
}
