//! Transaction collection, keyed by id.

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use wonfolio_core::errors::Error;
use wonfolio_core::transactions::{AssetClass, Transaction, TransactionRepositoryTrait, TxType};
use wonfolio_core::Result;

use crate::errors::{corrupt_row, query_failed};

pub struct TransactionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TransactionRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Unexpected("database mutex poisoned".to_string()))
    }
}

/// Column values exactly as stored, before domain conversion.
struct StoredTransaction {
    id: i64,
    date: Option<String>,
    name: String,
    ticker: Option<String>,
    tx_type: String,
    tx_type_raw: String,
    qty: String,
    price: String,
    amount: String,
    amount_krw: String,
    fee: String,
    tax: String,
    fx_rate: String,
    currency: String,
    ref_id: String,
    account: String,
    asset_class: String,
}

fn parse_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| corrupt_row(format!("bad decimal in column {}: {}", column, e)))
}

impl StoredTransaction {
    fn into_transaction(self) -> Result<Transaction> {
        let date = match self.date {
            Some(s) => Some(
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|e| corrupt_row(format!("bad date '{}': {}", s, e)))?,
            ),
            None => None,
        };
        Ok(Transaction {
            id: self.id,
            date,
            name: self.name,
            ticker: self.ticker,
            tx_type: TxType::from_str(&self.tx_type).map_err(corrupt_row)?,
            tx_type_raw: self.tx_type_raw,
            qty: parse_decimal(&self.qty, "qty")?,
            price: parse_decimal(&self.price, "price")?,
            amount: parse_decimal(&self.amount, "amount")?,
            amount_krw: parse_decimal(&self.amount_krw, "amount_krw")?,
            fee: parse_decimal(&self.fee, "fee")?,
            tax: parse_decimal(&self.tax, "tax")?,
            fx_rate: parse_decimal(&self.fx_rate, "fx_rate")?,
            currency: self.currency,
            ref_id: self.ref_id,
            account: self.account,
            asset_class: AssetClass::from_str(&self.asset_class).map_err(corrupt_row)?,
        })
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn get_all(&self) -> Result<Vec<Transaction>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, date, name, ticker, tx_type, tx_type_raw, qty, price, amount,
                        amount_krw, fee, tax, fx_rate, currency, ref_id, account, asset_class
                 FROM transactions ORDER BY id",
            )
            .map_err(query_failed)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredTransaction {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    name: row.get(2)?,
                    ticker: row.get(3)?,
                    tx_type: row.get(4)?,
                    tx_type_raw: row.get(5)?,
                    qty: row.get(6)?,
                    price: row.get(7)?,
                    amount: row.get(8)?,
                    amount_krw: row.get(9)?,
                    fee: row.get(10)?,
                    tax: row.get(11)?,
                    fx_rate: row.get(12)?,
                    currency: row.get(13)?,
                    ref_id: row.get(14)?,
                    account: row.get(15)?,
                    asset_class: row.get(16)?,
                })
            })
            .map_err(query_failed)?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row.map_err(query_failed)?.into_transaction()?);
        }
        Ok(transactions)
    }

    fn put_all(&self, transactions: &[Transaction]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(query_failed)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO transactions
                     (id, date, name, ticker, tx_type, tx_type_raw, qty, price, amount,
                      amount_krw, fee, tax, fx_rate, currency, ref_id, account, asset_class)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                )
                .map_err(query_failed)?;
            for t in transactions {
                stmt.execute(params![
                    t.id,
                    t.date.map(|d| d.to_string()),
                    t.name,
                    t.ticker,
                    t.tx_type.as_str(),
                    t.tx_type_raw,
                    t.qty.to_string(),
                    t.price.to_string(),
                    t.amount.to_string(),
                    t.amount_krw.to_string(),
                    t.fee.to_string(),
                    t.tax.to_string(),
                    t.fx_rate.to_string(),
                    t.currency,
                    t.ref_id,
                    t.account,
                    t.asset_class.as_str(),
                ])
                .map_err(query_failed)?;
            }
        }
        tx.commit().map_err(query_failed)
    }

    fn delete(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM transactions WHERE id = ?1", params![id])
            .map_err(query_failed)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM transactions", [])
            .map_err(query_failed)?;
        Ok(())
    }
}
