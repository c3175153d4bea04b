//! Catalog operations: product CRUD, search and stock adjustment.

use crate::store::InventoryStore;
use anyhow::Result;
use domain::{DomainError, Product};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        sku: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        quantity: row.get(3)?,
    })
}

impl InventoryStore {
    /// Insert a new product. The SKU must not exist yet; a primary-key
    /// collision surfaces as `DomainError::DuplicateSku`.
    pub async fn add_product(&self, product: &Product) -> Result<()> {
        let conn = self.pool.get()?;

        let inserted = conn.execute(
            "INSERT INTO products (sku, name, price, quantity) VALUES (?1, ?2, ?3, ?4)",
            params![product.sku, product.name, product.price, product.quantity],
        );

        match inserted {
            Ok(_) => {
                debug!("added product {}", product.sku);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(DomainError::DuplicateSku(product.sku.clone()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_product(&self, sku: &str) -> Result<Option<Product>> {
        let conn = self.pool.get()?;

        let product = conn
            .query_row(
                "SELECT sku, name, price, quantity FROM products WHERE sku = ?1",
                params![sku],
                product_from_row,
            )
            .optional()?;

        Ok(product)
    }

    /// All products, ordered by display name.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT sku, name, price, quantity FROM products ORDER BY name")?;
        let products = stmt
            .query_map([], product_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Products whose name or SKU contains `term` as a substring. An empty
    /// term matches everything, which is what the billing search box shows
    /// before the user types.
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>> {
        let conn = self.pool.get()?;
        let pattern = format!("%{}%", term);

        let mut stmt = conn.prepare(
            "SELECT sku, name, price, quantity FROM products
             WHERE name LIKE ?1 OR sku LIKE ?1
             ORDER BY name",
        )?;
        let products = stmt
            .query_map(params![pattern], product_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Edit a product's mutable display fields. The SKU itself never
    /// changes once created.
    pub async fn update_product(&self, sku: &str, name: &str, price: f64) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Name is required".into()).into());
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Price must be a non-negative number, got {}",
                price
            ))
            .into());
        }

        let conn = self.pool.get()?;
        let updated = conn.execute(
            "UPDATE products SET name = ?1, price = ?2 WHERE sku = ?3",
            params![name, price, sku],
        )?;

        if updated == 0 {
            return Err(DomainError::NotFound(format!("product '{}'", sku)).into());
        }

        Ok(())
    }

    /// Apply `quantity += delta` in one conditional statement. The update
    /// refuses to drive stock negative and reports which constraint failed.
    pub async fn adjust_quantity(&self, sku: &str, delta: i64) -> Result<()> {
        let conn = self.pool.get()?;

        let updated = conn.execute(
            "UPDATE products SET quantity = quantity + ?1
             WHERE sku = ?2 AND quantity + ?1 >= 0",
            params![delta, sku],
        )?;

        if updated == 0 {
            let current: Option<(String, i64)> = conn
                .query_row(
                    "SELECT name, quantity FROM products WHERE sku = ?1",
                    params![sku],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            return match current {
                None => Err(DomainError::NotFound(format!("product '{}'", sku)).into()),
                Some((name, available)) => Err(DomainError::InsufficientStock {
                    name,
                    requested: -delta,
                    available,
                }
                .into()),
            };
        }

        Ok(())
    }

    /// Delete a product row. Returns whether a row was actually removed,
    /// so callers can tell a delete from a no-op. Past transactions keep
    /// their item snapshots either way.
    pub async fn delete_product(&self, sku: &str) -> Result<bool> {
        let conn = self.pool.get()?;

        let deleted = conn.execute("DELETE FROM products WHERE sku = ?1", params![sku])?;
        if deleted > 0 {
            debug!("deleted product {}", sku);
        }

        Ok(deleted > 0)
    }
}
