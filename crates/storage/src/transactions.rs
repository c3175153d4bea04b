//! The append-only sale log.

use crate::store::InventoryStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use domain::{SaleItem, TransactionRecord};
use rusqlite::params;
use tracing::debug;

fn parse_record(
    id: i64,
    total: f64,
    created_at: String,
    items_json: String,
) -> Result<TransactionRecord> {
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .with_context(|| format!("Malformed created_at on transaction {}", id))?
        .with_timezone(&Utc);
    let items: Vec<SaleItem> = serde_json::from_str(&items_json)
        .with_context(|| format!("Malformed items on transaction {}", id))?;

    Ok(TransactionRecord {
        id,
        total,
        created_at,
        items,
    })
}

type RawRow = (i64, f64, String, String);

impl InventoryStore {
    /// Append a sale record directly. Checkout performs this same insert
    /// inside its own transaction; the standalone form exists for data
    /// import and for seeding known histories in tests.
    pub async fn append_transaction(
        &self,
        total: f64,
        created_at: DateTime<Utc>,
        items: &[SaleItem],
    ) -> Result<TransactionRecord> {
        let items_json = serde_json::to_string(items).context("Failed to serialize sale items")?;

        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO transactions (total, created_at, items) VALUES (?1, ?2, ?3)",
            params![total, created_at.to_rfc3339(), items_json],
        )?;
        let id = conn.last_insert_rowid();

        Ok(TransactionRecord {
            id,
            total,
            created_at,
            items: items.to_vec(),
        })
    }

    /// All recorded sales, newest first.
    pub async fn list_transactions(&self) -> Result<Vec<TransactionRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, total, created_at, items FROM transactions ORDER BY created_at DESC",
        )?;
        let rows: Vec<RawRow> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, total, created_at, items)| parse_record(id, total, created_at, items))
            .collect()
    }

    pub async fn get_transaction(&self, id: i64) -> Result<Option<TransactionRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn
            .prepare("SELECT id, total, created_at, items FROM transactions WHERE id = ?1")?;
        let mut rows: Vec<RawRow> = stmt
            .query_map(params![id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        match rows.pop() {
            Some((id, total, created_at, items)) => {
                Ok(Some(parse_record(id, total, created_at, items)?))
            }
            None => Ok(None),
        }
    }

    /// Delete a sale record. Product quantities are deliberately left
    /// untouched: a deleted transaction does not restock anything.
    /// Returns whether a row was actually removed.
    pub async fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.pool.get()?;

        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if deleted > 0 {
            debug!("deleted transaction {}", id);
        }

        Ok(deleted > 0)
    }
}
