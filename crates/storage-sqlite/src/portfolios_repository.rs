//! User-defined portfolios, keyed by id. List and map fields are stored as
//! JSON columns.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection};

use wonfolio_core::errors::Error;
use wonfolio_core::transactions::{Portfolio, PortfolioRepositoryTrait};
use wonfolio_core::Result;

use crate::errors::{corrupt_row, query_failed};

pub struct PortfolioRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PortfolioRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Unexpected("database mutex poisoned".to_string()))
    }
}

impl PortfolioRepositoryTrait for PortfolioRepository {
    fn get_all(&self) -> Result<Vec<Portfolio>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, name, tickers, target_weights, created_at FROM portfolios ORDER BY id")
            .map_err(query_failed)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(query_failed)?;

        let mut portfolios = Vec::new();
        for row in rows {
            let (id, name, tickers, target_weights, created_at) = row.map_err(query_failed)?;
            portfolios.push(Portfolio {
                id,
                name,
                tickers: serde_json::from_str(&tickers)
                    .map_err(|e| corrupt_row(format!("bad tickers json: {}", e)))?,
                target_weights: serde_json::from_str(&target_weights)
                    .map_err(|e| corrupt_row(format!("bad target_weights json: {}", e)))?,
                created_at,
            });
        }
        Ok(portfolios)
    }

    fn put_all(&self, portfolios: &[Portfolio]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(query_failed)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO portfolios
                     (id, name, tickers, target_weights, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(query_failed)?;
            for portfolio in portfolios {
                stmt.execute(params![
                    portfolio.id,
                    portfolio.name,
                    serde_json::to_string(&portfolio.tickers)?,
                    serde_json::to_string(&portfolio.target_weights)?,
                    portfolio.created_at,
                ])
                .map_err(query_failed)?;
            }
        }
        tx.commit().map_err(query_failed)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM portfolios WHERE id = ?1", params![id])
            .map_err(query_failed)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM portfolios", [])
            .map_err(query_failed)?;
        Ok(())
    }
}
