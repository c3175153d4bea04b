//! Line parser for the interactive shell.

use anyhow::{bail, Result};

/// Time windows of the revenue chart, matching the dashboard buttons of
/// the classic shop screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueRange {
    Week,
    Month,
    Year,
}

impl RevenueRange {
    pub fn days(self) -> i64 {
        match self {
            RevenueRange::Week => 7,
            RevenueRange::Month => 30,
            RevenueRange::Year => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RevenueRange::Week => "week",
            RevenueRange::Month => "month",
            RevenueRange::Year => "year",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Stats,
    Products,
    Search { term: String },
    /// Starts the add-product form; fields are prompted one by one
    Add,
    /// Starts the edit form for name/price of an existing product
    Edit { sku: String },
    Restock { sku: String, delta: i64 },
    Delete { sku: String },
    ShowBill,
    BillAdd { sku: String, quantity: i64 },
    BillRemove { sku: String },
    BillClear,
    Checkout,
    Transactions,
    ViewTransaction { id: i64 },
    DeleteTransaction { id: i64 },
    Revenue { range: RevenueRange },
    Ask { question: String },
    Quit,
}

/// Everything after the first whitespace-separated word, trimmed.
fn rest(line: &str) -> &str {
    line.split_once(char::is_whitespace)
        .map(|(_, r)| r.trim())
        .unwrap_or("")
}

fn parse_i64(token: Option<&str>, what: &str) -> Result<i64> {
    match token.and_then(|t| t.parse().ok()) {
        Some(value) => Ok(value),
        None => bail!("{} must be a whole number", what),
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let head = match parts.next() {
            Some(head) => head,
            None => bail!("Type a command, or 'help' for the list"),
        };

        let command = match head {
            "help" | "?" => Command::Help,
            "stats" | "dashboard" => Command::Stats,
            "products" | "list" => Command::Products,
            "search" => Command::Search {
                term: rest(line).to_string(),
            },
            "add" => Command::Add,
            "edit" => match parts.next() {
                Some(sku) => Command::Edit { sku: sku.to_string() },
                None => bail!("Usage: edit <sku>"),
            },
            "restock" => {
                let sku = match parts.next() {
                    Some(sku) => sku.to_string(),
                    None => bail!("Usage: restock <sku> <delta>"),
                };
                let delta = parse_i64(parts.next(), "Delta")?;
                Command::Restock { sku, delta }
            }
            "delete" => match parts.next() {
                Some(sku) => Command::Delete { sku: sku.to_string() },
                None => bail!("Usage: delete <sku>"),
            },
            "bill" => match parts.next() {
                None => Command::ShowBill,
                Some("add") => {
                    let sku = match parts.next() {
                        Some(sku) => sku.to_string(),
                        None => bail!("Usage: bill add <sku> [quantity]"),
                    };
                    let quantity = match parts.next() {
                        Some(qty) => parse_i64(Some(qty), "Quantity")?,
                        None => 1,
                    };
                    Command::BillAdd { sku, quantity }
                }
                Some("remove") => match parts.next() {
                    Some(sku) => Command::BillRemove {
                        sku: sku.to_string(),
                    },
                    None => bail!("Usage: bill remove <sku>"),
                },
                Some("clear") => Command::BillClear,
                Some(other) => bail!("Unknown bill action '{}'", other),
            },
            "checkout" => Command::Checkout,
            "tx" | "transactions" => match parts.next() {
                None => Command::Transactions,
                Some("delete") => Command::DeleteTransaction {
                    id: parse_i64(parts.next(), "Transaction id")?,
                },
                Some(id) => Command::ViewTransaction {
                    id: parse_i64(Some(id), "Transaction id")?,
                },
            },
            "revenue" => match parts.next() {
                Some("week") => Command::Revenue {
                    range: RevenueRange::Week,
                },
                Some("month") | None => Command::Revenue {
                    range: RevenueRange::Month,
                },
                Some("year") => Command::Revenue {
                    range: RevenueRange::Year,
                },
                Some(other) => bail!("Unknown range '{}' (week, month or year)", other),
            },
            "ask" => {
                let question = rest(line);
                if question.is_empty() {
                    bail!("Usage: ask <question for the advisor>");
                }
                Command::Ask {
                    question: question.to_string(),
                }
            }
            "quit" | "exit" => Command::Quit,
            other => bail!("Unknown command '{}'. Type 'help' for the list.", other),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("help").unwrap(), Command::Help);
        assert_eq!(Command::parse("  stats ").unwrap(), Command::Stats);
        assert_eq!(Command::parse("products").unwrap(), Command::Products);
        assert_eq!(Command::parse("checkout").unwrap(), Command::Checkout);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_search_keeps_spaces_in_term() {
        assert_eq!(
            Command::parse("search green tea").unwrap(),
            Command::Search {
                term: "green tea".into()
            }
        );
        assert_eq!(
            Command::parse("search").unwrap(),
            Command::Search { term: "".into() }
        );
    }

    #[test]
    fn test_bill_subcommands() {
        assert_eq!(Command::parse("bill").unwrap(), Command::ShowBill);
        assert_eq!(
            Command::parse("bill add A-1").unwrap(),
            Command::BillAdd {
                sku: "A-1".into(),
                quantity: 1
            }
        );
        assert_eq!(
            Command::parse("bill add A-1 3").unwrap(),
            Command::BillAdd {
                sku: "A-1".into(),
                quantity: 3
            }
        );
        assert_eq!(
            Command::parse("bill remove A-1").unwrap(),
            Command::BillRemove { sku: "A-1".into() }
        );
        assert_eq!(Command::parse("bill clear").unwrap(), Command::BillClear);
        assert!(Command::parse("bill add A-1 lots").is_err());
        assert!(Command::parse("bill frobnicate").is_err());
    }

    #[test]
    fn test_transaction_commands() {
        assert_eq!(Command::parse("tx").unwrap(), Command::Transactions);
        assert_eq!(
            Command::parse("tx 7").unwrap(),
            Command::ViewTransaction { id: 7 }
        );
        assert_eq!(
            Command::parse("tx delete 7").unwrap(),
            Command::DeleteTransaction { id: 7 }
        );
        assert!(Command::parse("tx delete seven").is_err());
    }

    #[test]
    fn test_revenue_ranges() {
        assert_eq!(
            Command::parse("revenue week").unwrap(),
            Command::Revenue {
                range: RevenueRange::Week
            }
        );
        // Month is the default view
        assert_eq!(
            Command::parse("revenue").unwrap(),
            Command::Revenue {
                range: RevenueRange::Month
            }
        );
        assert!(Command::parse("revenue decade").is_err());
        assert_eq!(RevenueRange::Year.days(), 365);
    }

    #[test]
    fn test_ask_requires_a_question() {
        assert_eq!(
            Command::parse("ask what should I restock?").unwrap(),
            Command::Ask {
                question: "what should I restock?".into()
            }
        );
        assert!(Command::parse("ask").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("").is_err());
    }
}
