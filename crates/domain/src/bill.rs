//! The in-memory bill for a sale in progress.
//!
//! A bill lives only for the duration of one checkout interaction and is
//! never persisted. Lines are keyed by SKU, so two products that happen to
//! share a display name stay separate lines; the transaction snapshot taken
//! at checkout records display names only.

use crate::errors::{DomainError, DomainResult};
use crate::product::Product;
use crate::transaction::SaleItem;

/// One pending sale line.
#[derive(Debug, Clone, PartialEq)]
pub struct BillLine {
    pub sku: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl BillLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Ordered collection of pending sale lines.
#[derive(Debug, Clone, Default)]
pub struct Bill {
    lines: Vec<BillLine>,
}

impl Bill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    /// Add units of a product. A line for the same SKU already on the bill
    /// is incremented in place; line order is insertion order.
    pub fn add(&mut self, product: &Product, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::InvalidInput(format!(
                "Quantity must be positive, got {}",
                quantity
            )));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.sku == product.sku) {
            line.quantity += quantity;
        } else {
            self.lines.push(BillLine {
                sku: product.sku.clone(),
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
            });
        }

        Ok(())
    }

    /// Units of a SKU already on the bill, zero if absent.
    pub fn quantity_of(&self, sku: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.sku == sku)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Remove the line for a SKU. Returns whether a line was removed.
    pub fn remove(&mut self, sku: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.sku != sku);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(BillLine::subtotal).sum()
    }

    /// The `{name, quantity}` snapshot recorded on the transaction.
    pub fn items_snapshot(&self) -> Vec<SaleItem> {
        self.lines
            .iter()
            .map(|l| SaleItem {
                name: l.name.clone(),
                quantity: l.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, name: &str, price: f64) -> Product {
        Product::new(sku, name, price, 100).expect("valid product")
    }

    #[test]
    fn test_add_merges_by_sku() {
        let mut bill = Bill::new();
        bill.add(&product("A-1", "Widget", 2.5), 1).expect("add");
        bill.add(&product("A-1", "Widget", 2.5), 2).expect("add");

        assert_eq!(bill.lines().len(), 1);
        assert_eq!(bill.lines()[0].quantity, 3);
        assert_eq!(bill.total(), 7.5);
    }

    #[test]
    fn test_same_name_different_sku_stays_separate() {
        // Two SKUs sharing a display name must not collapse into one line.
        let mut bill = Bill::new();
        bill.add(&product("A-1", "Widget", 2.0), 1).expect("add");
        bill.add(&product("B-2", "Widget", 3.0), 1).expect("add");

        assert_eq!(bill.lines().len(), 2);
        assert_eq!(bill.total(), 5.0);
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let mut bill = Bill::new();
        assert!(bill.add(&product("A-1", "Widget", 2.0), 0).is_err());
        assert!(bill.add(&product("A-1", "Widget", 2.0), -3).is_err());
        assert!(bill.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut bill = Bill::new();
        bill.add(&product("A-1", "Widget", 2.0), 1).expect("add");
        bill.add(&product("B-2", "Gadget", 4.0), 1).expect("add");

        assert!(bill.remove("A-1"));
        assert!(!bill.remove("A-1"));
        assert_eq!(bill.lines().len(), 1);

        bill.clear();
        assert!(bill.is_empty());
        assert_eq!(bill.total(), 0.0);
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let mut bill = Bill::new();
        bill.add(&product("B-2", "Gadget", 4.0), 2).expect("add");
        bill.add(&product("A-1", "Widget", 2.0), 1).expect("add");

        let items = bill.items_snapshot();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Gadget");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].name, "Widget");
    }
}
