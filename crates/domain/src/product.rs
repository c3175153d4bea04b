use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Products with fewer units than this count as "low stock" on the
/// dashboard and in the advisory digest.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// A catalog entry. The SKU is the primary key and never changes after
/// creation; the display name is free-form and not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl Product {
    /// Validate and construct a product. Rejects empty identifiers,
    /// negative or non-finite prices and negative stock counts.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> DomainResult<Self> {
        let sku = sku.into().trim().to_string();
        let name = name.into().trim().to_string();

        if sku.is_empty() {
            return Err(DomainError::InvalidInput("SKU is required".into()));
        }
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Name is required".into()));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Price must be a non-negative number, got {}",
                price
            )));
        }
        if quantity < 0 {
            return Err(DomainError::InvalidInput(format!(
                "Quantity must be a non-negative integer, got {}",
                quantity
            )));
        }

        Ok(Self {
            sku,
            name,
            price,
            quantity,
        })
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_product() {
        let p = Product::new("SKU-1", "Widget", 9.99, 10).expect("valid product");
        assert_eq!(p.sku, "SKU-1");
        assert_eq!(p.name, "Widget");
        assert!(!p.is_low_stock());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let p = Product::new("  SKU-1 ", " Widget ", 1.0, 0).expect("valid product");
        assert_eq!(p.sku, "SKU-1");
        assert_eq!(p.name, "Widget");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Product::new("", "Widget", 1.0, 1).is_err());
        assert!(Product::new("SKU-1", "   ", 1.0, 1).is_err());
        assert!(Product::new("SKU-1", "Widget", -0.01, 1).is_err());
        assert!(Product::new("SKU-1", "Widget", f64::NAN, 1).is_err());
        assert!(Product::new("SKU-1", "Widget", 1.0, -1).is_err());
    }

    #[test]
    fn test_low_stock_threshold() {
        let low = Product::new("A", "A", 1.0, LOW_STOCK_THRESHOLD - 1).expect("valid product");
        let ok = Product::new("B", "B", 1.0, LOW_STOCK_THRESHOLD).expect("valid product");
        assert!(low.is_low_stock());
        assert!(!ok.is_low_stock());
    }
}
