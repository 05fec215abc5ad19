//! SQLite Token Store
//!
//! Single-table store for accepted tokens. The table is created on open
//! (idempotent) and rows are written with `INSERT OR REPLACE` keyed on
//! `token_address`.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use crate::domain::token::TokenRecord;
use crate::ports::store::{StoreError, StoredToken, TokenStore};

const CREATE_TOKENS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS tokens (
        token_address TEXT PRIMARY KEY,
        price REAL,
        volume REAL,
        liquidity REAL,
        market_cap REAL,
        pair_created_at TEXT,
        developer_address TEXT
    )
"#;

pub struct SqliteTokenStore {
    conn: Mutex<Connection>,
}

impl SqliteTokenStore {
    /// Open (or create) the database file and make sure the table exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path.as_ref())?;
        let store = Self::from_connection(conn)?;
        tracing::debug!("Token store opened at {}", path.as_ref().display());
        Ok(store)
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self { conn: Mutex::new(conn) };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the tokens table if it does not exist
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute_batch(CREATE_TOKENS_TABLE)?;
        Ok(())
    }
}

impl TokenStore for SqliteTokenStore {
    fn upsert(&self, record: &TokenRecord) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO tokens VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.token_address,
                record.price,
                record.volume,
                record.liquidity,
                record.market_cap,
                record.pair_created_at_iso(),
                record.developer_address,
            ],
        )?;

        tracing::debug!("Upserted token: {}", record.token_address);
        Ok(())
    }

    fn get(&self, token_address: &str) -> Result<Option<StoredToken>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let row = conn
            .query_row(
                r#"
                SELECT token_address, price, volume, liquidity, market_cap,
                       pair_created_at, developer_address
                FROM tokens WHERE token_address = ?1
                "#,
                params![token_address],
                |row| {
                    Ok(StoredToken {
                        token_address: row.get(0)?,
                        price: row.get(1)?,
                        volume: row.get(2)?,
                        liquidity: row.get(3)?,
                        market_cap: row.get(4)?,
                        pair_created_at: row.get(5)?,
                        developer_address: row.get(6)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tokens", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
