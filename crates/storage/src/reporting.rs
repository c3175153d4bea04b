//! Read-only aggregations over the catalog and the sale log.

use crate::store::InventoryStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use domain::{format_usd, Product, SaleItem, LOW_STOCK_THRESHOLD};
use rusqlite::params;
use std::collections::HashMap;

/// How many recent transactions feed the top-seller ranking.
const RECENT_SALES_WINDOW: i64 = 50;

/// The dashboard's four stat cards. Always fully populated; an empty
/// database yields zeros, never nulls.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_products: i64,
    pub low_stock: i64,
    pub total_transactions: i64,
    pub total_revenue: f64,
}

impl DashboardStats {
    /// Revenue as shown on the dashboard card, e.g. `$0.00`.
    pub fn revenue_display(&self) -> String {
        format_usd(self.total_revenue)
    }
}

/// One point of the revenue chart. Dates with no sales are omitted from
/// the series rather than reported as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Units sold per product name across the recent sales window.
#[derive(Debug, Clone, PartialEq)]
pub struct TopSeller {
    pub name: String,
    pub units: i64,
}

impl InventoryStore {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let conn = self.pool.get()?;

        let (total_products, low_stock) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(CASE WHEN quantity < ?1 THEN 1 ELSE 0 END), 0)
             FROM products",
            params![LOW_STOCK_THRESHOLD],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let (total_transactions, total_revenue) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(total), 0.0) FROM transactions",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(DashboardStats {
            total_products,
            low_stock,
            total_transactions,
            total_revenue,
        })
    }

    /// Revenue summed per calendar day for transactions dated inside
    /// `[start, end]` inclusive, ordered by date.
    pub async fn revenue_by_day(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRevenue>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT DATE(created_at), SUM(total)
             FROM transactions
             WHERE DATE(created_at) BETWEEN ?1 AND ?2
             GROUP BY DATE(created_at)
             ORDER BY DATE(created_at)",
        )?;
        let rows: Vec<(String, f64)> = stmt
            .query_map(params![start.to_string(), end.to_string()], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(date, revenue)| {
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .with_context(|| format!("Malformed transaction date '{}'", date))?;
                Ok(DailyRevenue { date, revenue })
            })
            .collect()
    }

    /// Scan the most recent transactions and rank product names by units
    /// sold, descending. Ties break alphabetically so the ranking is
    /// stable.
    pub async fn top_sellers(&self, limit: usize) -> Result<Vec<TopSeller>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT items FROM transactions ORDER BY created_at DESC LIMIT ?1",
        )?;
        let rows: Vec<String> = stmt
            .query_map(params![RECENT_SALES_WINDOW], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut units_by_name: HashMap<String, i64> = HashMap::new();
        for items_json in rows {
            let items: Vec<SaleItem> =
                serde_json::from_str(&items_json).context("Malformed items on transaction")?;
            for item in items {
                *units_by_name.entry(item.name).or_insert(0) += item.quantity;
            }
        }

        let mut sellers: Vec<TopSeller> = units_by_name
            .into_iter()
            .map(|(name, units)| TopSeller { name, units })
            .collect();
        sellers.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));
        sellers.truncate(limit);

        Ok(sellers)
    }

    /// Products closest to running out, lowest stock first.
    pub async fn low_stock_items(&self, limit: usize) -> Result<Vec<Product>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT sku, name, price, quantity FROM products
             ORDER BY quantity ASC, name LIMIT ?1",
        )?;
        let products = stmt
            .query_map(params![limit as i64], |row| {
                Ok(Product {
                    sku: row.get(0)?,
                    name: row.get(1)?,
                    price: row.get(2)?,
                    quantity: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }
}
