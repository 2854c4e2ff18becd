//! Name → ticker map, keyed by name.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection};

use wonfolio_core::errors::Error;
use wonfolio_core::transactions::{TickerMapRepositoryTrait, TickerMapping};
use wonfolio_core::Result;

use crate::errors::query_failed;

pub struct TickerMapRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TickerMapRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Unexpected("database mutex poisoned".to_string()))
    }
}

impl TickerMapRepositoryTrait for TickerMapRepository {
    fn get_all(&self) -> Result<Vec<TickerMapping>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT name, ticker FROM ticker_map ORDER BY name")
            .map_err(query_failed)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TickerMapping {
                    name: row.get(0)?,
                    ticker: row.get(1)?,
                })
            })
            .map_err(query_failed)?;

        let mut mappings = Vec::new();
        for row in rows {
            mappings.push(row.map_err(query_failed)?);
        }
        Ok(mappings)
    }

    fn put_all(&self, mappings: &[TickerMapping]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(query_failed)?;
        {
            let mut stmt = tx
                .prepare("INSERT OR REPLACE INTO ticker_map (name, ticker) VALUES (?1, ?2)")
                .map_err(query_failed)?;
            for mapping in mappings {
                stmt.execute(params![mapping.name, mapping.ticker])
                    .map_err(query_failed)?;
            }
        }
        tx.commit().map_err(query_failed)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM ticker_map WHERE name = ?1", params![name])
            .map_err(query_failed)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM ticker_map", [])
            .map_err(query_failed)?;
        Ok(())
    }
}
