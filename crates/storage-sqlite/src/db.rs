//! Connection management and schema creation.

use log::debug;
use rusqlite::Connection;

use wonfolio_core::Result;

use crate::errors::{connection_failed, migration_failed};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id          INTEGER PRIMARY KEY,
    date        TEXT,
    name        TEXT NOT NULL,
    ticker      TEXT,
    tx_type     TEXT NOT NULL,
    tx_type_raw TEXT NOT NULL,
    qty         TEXT NOT NULL,
    price       TEXT NOT NULL,
    amount      TEXT NOT NULL,
    amount_krw  TEXT NOT NULL,
    fee         TEXT NOT NULL,
    tax         TEXT NOT NULL,
    fx_rate     TEXT NOT NULL,
    currency    TEXT NOT NULL,
    ref_id      TEXT NOT NULL,
    account     TEXT NOT NULL,
    asset_class TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_transactions_ticker ON transactions (ticker);
CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions (date);

CREATE TABLE IF NOT EXISTS ticker_map (
    name   TEXT PRIMARY KEY,
    ticker TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS portfolios (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    tickers        TEXT NOT NULL,
    target_weights TEXT NOT NULL,
    created_at     TEXT NOT NULL
);
";

/// Opens (or creates) the database file and ensures the schema exists.
pub fn establish_connection(db_path: &str) -> Result<Connection> {
    debug!("Opening database at {}", db_path);
    let conn = Connection::open(db_path).map_err(connection_failed)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Creates all collections if missing. Idempotent.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).map_err(migration_failed)
}

#[cfg(test)]
pub(crate) fn open_test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory database");
    run_migrations(&conn).expect("schema");
    conn
}
