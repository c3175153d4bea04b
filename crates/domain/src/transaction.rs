//! Completed-sale records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sold line inside a transaction: a point-in-time snapshot by display
/// name, deliberately not a foreign key. Renaming or deleting a product
/// later never rewrites history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub name: String,
    pub quantity: i64,
}

/// An immutable record of a completed sale. Only deletion is permitted
/// after creation, and deletion does not restock anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<SaleItem>,
}

impl TransactionRecord {
    /// Total units across all items, shown in the transactions list.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_count() {
        let tx = TransactionRecord {
            id: 1,
            total: 12.0,
            created_at: Utc::now(),
            items: vec![
                SaleItem {
                    name: "Widget".into(),
                    quantity: 2,
                },
                SaleItem {
                    name: "Gadget".into(),
                    quantity: 3,
                },
            ],
        };
        assert_eq!(tx.item_count(), 5);
    }

    #[test]
    fn test_items_json_shape() {
        // The persisted `items` column stores exactly this JSON shape.
        let items = vec![SaleItem {
            name: "Widget".into(),
            quantity: 2,
        }];
        let json = serde_json::to_string(&items).expect("serialize items");
        assert_eq!(json, r#"[{"name":"Widget","quantity":2}]"#);

        let back: Vec<SaleItem> = serde_json::from_str(&json).expect("deserialize items");
        assert_eq!(back, items);
    }
}
