//! Shop data folded into the advisory prompt.

use std::fmt::Write;

/// Snapshot of the numbers the assistant reasons about, built from the
/// reporting queries: products closest to running out and recent best
/// sellers.
#[derive(Debug, Clone, Default)]
pub struct ShopDigest {
    /// `(name, units remaining)`, lowest stock first
    pub low_stock: Vec<(String, i64)>,
    /// `(name, units sold recently)`, best seller first
    pub top_sellers: Vec<(String, i64)>,
}

impl ShopDigest {
    /// The system prompt sent alongside the shop owner's question.
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::from(
            "You are an expert inventory management assistant. Your goal is to \
             provide clear, actionable advice to a shop owner. Analyze the \
             following data and answer the user's question. Do not create \
             headings; keep the formatting simple.\n\n\
             Inventory and sales data summary:\n",
        );

        prompt.push_str("Low stock products:\n");
        if self.low_stock.is_empty() {
            prompt.push_str("- none\n");
        }
        for (name, quantity) in &self.low_stock {
            let _ = writeln!(prompt, "- {}: {} units remaining", name, quantity);
        }

        prompt.push_str("Top selling products (from recent transactions):\n");
        if self.top_sellers.is_empty() {
            prompt.push_str("- none\n");
        }
        for (name, units) in &self.top_sellers {
            let _ = writeln!(prompt, "- {}: {} units sold", name, units);
        }

        prompt.push_str(
            "\nBased on this data, provide a concise recommendation. Focus on \
             what to restock, what might be overstocked, and potential sales \
             strategies.",
        );

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_shop_data() {
        let digest = ShopDigest {
            low_stock: vec![("Gadget".into(), 1)],
            top_sellers: vec![("Widget".into(), 12)],
        };

        let prompt = digest.system_prompt();
        assert!(prompt.contains("Gadget: 1 units remaining"));
        assert!(prompt.contains("Widget: 12 units sold"));
    }

    #[test]
    fn test_prompt_handles_empty_shop() {
        let prompt = ShopDigest::default().system_prompt();
        assert!(prompt.contains("Low stock products:\n- none"));
        assert!(prompt.contains("Top selling products (from recent transactions):\n- none"));
    }
}
