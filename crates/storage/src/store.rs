use anyhow::{Context, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub(crate) type DbPool = Pool<SqliteConnectionManager>;

const DEFAULT_POOL_SIZE: u32 = 4;

/// Connection-pooled SQLite store. All shop state lives in two tables:
/// `products` (the catalog) and `transactions` (the append-only sale log).
pub struct InventoryStore {
    pub(crate) pool: Arc<DbPool>,
}

impl InventoryStore {
    /// Open (or create) the database at `path` with the default pool size.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_pool_size(path, DEFAULT_POOL_SIZE).await
    }

    pub async fn open_with_pool_size<P: AsRef<Path>>(path: P, pool_size: u32) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path.as_ref());
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .context("Failed to create connection pool")?;

        {
            let conn = pool.get()?;
            Self::init_schema(&conn)?;
        }

        debug!("opened inventory database at {}", path.as_ref().display());

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            -- Product catalog, keyed by immutable SKU
            CREATE TABLE IF NOT EXISTS products (
                sku TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                quantity INTEGER NOT NULL
            );

            -- Append-only sale log; items is a JSON array of
            -- {"name": ..., "quantity": ...} snapshots
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                total REAL NOT NULL,
                created_at TEXT NOT NULL,
                items TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_products_name ON products(name);
            CREATE INDEX IF NOT EXISTS idx_transactions_created ON transactions(created_at DESC);

            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            "#,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_schema() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("shop.db");

        let store = InventoryStore::open(&db_path).await.expect("open store");

        // Both tables exist and are empty
        let conn = store.pool.get().expect("pool connection");
        let products: i64 = conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
            .expect("count products");
        let transactions: i64 = conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
            .expect("count transactions");
        assert_eq!(products, 0);
        assert_eq!(transactions, 0);
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("shop.db");

        drop(InventoryStore::open(&db_path).await.expect("first open"));
        InventoryStore::open(&db_path).await.expect("second open");
    }
}
