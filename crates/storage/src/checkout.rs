//! Checkout: turn an in-memory bill into a durable transaction while
//! keeping stock counts consistent.
//!
//! Every stock decrement is conditional (`... AND quantity >= ?`) and runs
//! inside one SQLite transaction together with the log append. A line that
//! cannot be satisfied aborts the whole checkout before anything becomes
//! visible, so oversell and partial application are both impossible.

use crate::store::InventoryStore;
use anyhow::{Context, Result};
use chrono::Utc;
use domain::{format_usd, Bill, DomainError, TransactionRecord};
use rusqlite::{params, OptionalExtension};
use tracing::{info, instrument};

impl InventoryStore {
    /// Commit a bill: decrement each line's stock and append one
    /// transaction record, atomically. On any failure the store is left
    /// exactly as it was; the error is surfaced for re-display and never
    /// retried here.
    #[instrument(skip(self, bill))]
    pub async fn checkout(&self, bill: &Bill) -> Result<TransactionRecord> {
        if bill.is_empty() {
            return Err(DomainError::EmptyBill.into());
        }

        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        for line in bill.lines() {
            let updated = tx.execute(
                "UPDATE products SET quantity = quantity - ?1
                 WHERE sku = ?2 AND quantity >= ?1",
                params![line.quantity, line.sku],
            )?;

            if updated == 0 {
                // Returning drops `tx`, rolling back earlier decrements.
                let current: Option<(String, i64)> = tx
                    .query_row(
                        "SELECT name, quantity FROM products WHERE sku = ?1",
                        params![line.sku],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )
                    .optional()?;

                return match current {
                    None => {
                        Err(DomainError::NotFound(format!("product '{}'", line.sku)).into())
                    }
                    Some((name, available)) => Err(DomainError::InsufficientStock {
                        name,
                        requested: line.quantity,
                        available,
                    }
                    .into()),
                };
            }
        }

        let total = bill.total();
        let created_at = Utc::now();
        let items = bill.items_snapshot();
        let items_json =
            serde_json::to_string(&items).context("Failed to serialize sale items")?;

        tx.execute(
            "INSERT INTO transactions (total, created_at, items) VALUES (?1, ?2, ?3)",
            params![total, created_at.to_rfc3339(), items_json],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;

        info!("checkout complete: transaction {} for {}", id, format_usd(total));

        Ok(TransactionRecord {
            id,
            total,
            created_at,
            items,
        })
    }
}
