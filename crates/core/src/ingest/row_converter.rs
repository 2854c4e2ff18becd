//! Raw row → canonical transaction conversion.

use std::collections::{HashMap, HashSet};

use log::debug;
use rust_decimal::Decimal;

use super::asset_class::detect_asset_class;
use super::column_mapper::{ColumnField, ColumnMap};
use super::tx_type_mapper::{is_bond_related, map_tx_type, TypeOutcome};
use super::value_parsers::{parse_date, parse_number};
use crate::constants::{DEFAULT_ACCOUNT_LABEL, REPORTING_CURRENCY};
use crate::transactions::{NewTransaction, UnmappedName};

/// Converts data rows into transactions using an established column map.
///
/// Missing columns degrade to zero/empty defaults; blank separator rows, bond
/// rows and ignore-classified cash legs are dropped. Instrument rows whose
/// name could not be resolved to a ticker (row column, then `ticker_cache`)
/// are collected into the unmapped-names list, deduplicated by name.
pub fn rows_to_transactions(
    rows: &[Vec<String>],
    col_map: &ColumnMap,
    ticker_cache: &HashMap<String, String>,
    account_label: &str,
) -> (Vec<NewTransaction>, Vec<UnmappedName>) {
    let mut transactions = Vec::new();
    let mut unmapped = Vec::new();
    let mut unmapped_seen = HashSet::new();

    for row in rows {
        let get = |field: ColumnField| -> &str {
            col_map
                .get(&field)
                .and_then(|index| row.get(*index))
                .map(String::as_str)
                .unwrap_or("")
        };

        let name = get(ColumnField::Name).trim().to_string();
        let tx_type_raw = get(ColumnField::TxTypeRaw).trim().to_string();
        let date = parse_date(get(ColumnField::Date));

        // Blank / separator rows.
        if date.is_none() && name.is_empty() && tx_type_raw.is_empty() {
            continue;
        }
        // Fixed income is outside the holdings model.
        if is_bond_related(&name, &tx_type_raw) {
            debug!("Skipping bond row: {} / {}", name, tx_type_raw);
            continue;
        }

        let memo = get(ColumnField::Memo).trim();
        let tx_type = match map_tx_type(&tx_type_raw, (!memo.is_empty()).then_some(memo)) {
            TypeOutcome::Mapped(tx_type) => tx_type,
            TypeOutcome::Ignore => {
                debug!("Skipping paired cash leg: {}", tx_type_raw);
                continue;
            }
        };

        let row_ticker = get(ColumnField::Ticker).trim().to_uppercase();
        let ticker = if !row_ticker.is_empty() {
            Some(row_ticker)
        } else {
            ticker_cache.get(&name).cloned()
        };

        let qty = parse_number(get(ColumnField::Qty));
        let price = parse_number(get(ColumnField::Price));
        let fee = parse_number(get(ColumnField::Fee));
        let tax = parse_number(get(ColumnField::Tax));

        // Observed behavior: missing fx-rate defaults to 1 even for
        // foreign-currency rows without a rate column.
        let parsed_fx = parse_number(get(ColumnField::FxRate));
        let fx_rate = if parsed_fx.is_zero() {
            Decimal::ONE
        } else {
            parsed_fx
        };

        let currency = {
            let c = get(ColumnField::Currency).trim().to_uppercase();
            if c.is_empty() {
                REPORTING_CURRENCY.to_string()
            } else {
                c
            }
        };

        let explicit_amount = parse_number(get(ColumnField::Amount));
        let amount = if explicit_amount.is_zero() {
            qty * price
        } else {
            explicit_amount
        };
        let amount_krw = if currency != REPORTING_CURRENCY {
            let explicit_krw = parse_number(get(ColumnField::AmountKrw));
            if explicit_krw.is_zero() {
                amount * fx_rate
            } else {
                explicit_krw
            }
        } else {
            amount
        };

        // The caller-chosen label wins over any in-row account column: users
        // deliberately re-attribute statements to accounts of their choosing.
        let account = if !account_label.is_empty() {
            account_label.to_string()
        } else {
            let row_account = get(ColumnField::Account).trim();
            if row_account.is_empty() {
                DEFAULT_ACCOUNT_LABEL.to_string()
            } else {
                row_account.to_string()
            }
        };

        if ticker.is_none() && !name.is_empty() && tx_type.needs_instrument() {
            if unmapped_seen.insert(name.clone()) {
                unmapped.push(UnmappedName::new(name.clone()));
            }
        }

        let asset_class = detect_asset_class(&name, ticker.as_deref(), &currency);

        transactions.push(NewTransaction {
            date,
            name,
            ticker,
            tx_type,
            tx_type_raw,
            qty,
            price,
            amount,
            amount_krw,
            fee,
            tax,
            fx_rate,
            currency,
            ref_id: get(ColumnField::RefId).trim().to_string(),
            account,
            asset_class,
        });
    }

    (transactions, unmapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::column_mapper::map_columns;
    use crate::transactions::{AssetClass, TxType};
    use rust_decimal_macros::dec;

    fn table(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn standard_map() -> ColumnMap {
        let headers: Vec<String> = ["날짜", "종목명", "종목코드", "거래구분", "수량", "단가"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        map_columns(&headers)
    }

    #[test]
    fn converts_a_buy_row() {
        let rows = table(&[&["2023-01-05", "삼성전자", "005930", "매수", "10", "70,000"]]);
        let (txs, unmapped) =
            rows_to_transactions(&rows, &standard_map(), &HashMap::new(), "테스트계좌");

        assert_eq!(txs.len(), 1);
        assert!(unmapped.is_empty());
        let tx = &txs[0];
        assert_eq!(tx.tx_type, TxType::Buy);
        assert_eq!(tx.ticker.as_deref(), Some("005930"));
        assert_eq!(tx.qty, dec!(10));
        assert_eq!(tx.price, dec!(70000));
        // No amount column: falls back to qty * price.
        assert_eq!(tx.amount, dec!(700000));
        assert_eq!(tx.amount_krw, dec!(700000));
        assert_eq!(tx.currency, "KRW");
        assert_eq!(tx.account, "테스트계좌");
        assert_eq!(tx.asset_class, AssetClass::KrStock);
    }

    #[test]
    fn missing_columns_default_to_zero_and_empty() {
        let headers: Vec<String> = ["날짜", "거래구분"].iter().map(|s| s.to_string()).collect();
        let map = map_columns(&headers);
        let rows = table(&[&["2023-02-01", "입금"]]);
        let (txs, unmapped) = rows_to_transactions(&rows, &map, &HashMap::new(), "");

        assert_eq!(txs.len(), 1);
        assert!(unmapped.is_empty());
        let tx = &txs[0];
        assert_eq!(tx.tx_type, TxType::Deposit);
        assert_eq!(tx.qty, Decimal::ZERO);
        assert_eq!(tx.amount, Decimal::ZERO);
        assert_eq!(tx.name, "");
        assert_eq!(tx.account, DEFAULT_ACCOUNT_LABEL);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let rows = table(&[
            &["", "", "", "", "", ""],
            &["2023-01-05", "삼성전자", "005930", "매수", "10", "70000"],
        ]);
        let (txs, _) = rows_to_transactions(&rows, &standard_map(), &HashMap::new(), "A");
        assert_eq!(txs.len(), 1);
    }

    #[test]
    fn bond_rows_are_excluded() {
        let rows = table(&[
            &["2023-01-05", "국고채권 01500-5003", "", "매수", "10", "9800"],
            &["2023-01-06", "", "", "채권만기상환출고", "10", "10000"],
        ]);
        let (txs, unmapped) = rows_to_transactions(&rows, &standard_map(), &HashMap::new(), "A");
        assert!(txs.is_empty());
        assert!(unmapped.is_empty());
    }

    #[test]
    fn unresolved_instrument_names_are_collected_once() {
        let rows = table(&[
            &["2023-01-05", "엔비디아", "", "매수", "1", "500"],
            &["2023-02-05", "엔비디아", "", "매수", "1", "520"],
            &["2023-03-05", "엔비디아", "", "배당금", "0", "0"],
        ]);
        let (txs, unmapped) = rows_to_transactions(&rows, &standard_map(), &HashMap::new(), "A");
        assert_eq!(txs.len(), 3);
        assert_eq!(unmapped.len(), 1);
        assert_eq!(unmapped[0].name, "엔비디아");
        assert_eq!(unmapped[0].ticker, "");
    }

    #[test]
    fn ticker_cache_resolves_names() {
        let mut cache = HashMap::new();
        cache.insert("엔비디아".to_string(), "NVDA".to_string());
        let rows = table(&[&["2023-01-05", "엔비디아", "", "매수", "1", "500"]]);
        let (txs, unmapped) = rows_to_transactions(&rows, &standard_map(), &cache, "A");
        assert_eq!(txs[0].ticker.as_deref(), Some("NVDA"));
        assert!(unmapped.is_empty());
    }

    #[test]
    fn foreign_currency_amount_is_converted() {
        let headers: Vec<String> = ["날짜", "종목명", "거래구분", "수량", "단가", "통화", "환율"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = map_columns(&headers);
        let rows = table(&[&["2023-01-05", "APPLE INC", "매수", "10", "150", "USD", "1,300"]]);
        let (txs, _) = rows_to_transactions(&rows, &map, &HashMap::new(), "A");

        let tx = &txs[0];
        assert_eq!(tx.amount, dec!(1500));
        assert_eq!(tx.amount_krw, dec!(1950000));
        assert_eq!(tx.fx_rate, dec!(1300));
        assert_eq!(tx.asset_class, AssetClass::UsStock);
    }

    #[test]
    fn ambiguous_trade_uses_memo_column() {
        let headers: Vec<String> = ["날짜", "종목명", "거래구분", "수량", "단가", "적요"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = map_columns(&headers);
        let rows = table(&[
            &["2023-01-05", "삼성전자", "매매", "10", "70000", "장내 매도"],
            &["2023-01-06", "삼성전자", "매매", "10", "70000", ""],
        ]);
        let (txs, _) = rows_to_transactions(&rows, &map, &HashMap::new(), "A");
        assert_eq!(txs[0].tx_type, TxType::Sell);
        assert_eq!(txs[1].tx_type, TxType::Buy);
    }
}
