//! Table and chart rendering for the shell.

use domain::{format_usd, Bill, Product, TransactionRecord};
use prettytable::{row, Table};
use std::fmt::Write;
use storage::{DailyRevenue, DashboardStats};

const CHART_WIDTH: usize = 40;

pub fn product_table(products: &[Product]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["SKU", "Name", "Price", "Quantity"]);
    for p in products {
        table.add_row(row![p.sku, p.name, format_usd(p.price), p.quantity]);
    }
    table
}

pub fn bill_table(bill: &Bill) -> Table {
    let mut table = Table::new();
    table.add_row(row!["SKU", "Name", "Qty", "Price", "Total"]);
    for line in bill.lines() {
        table.add_row(row![
            line.sku,
            line.name,
            line.quantity,
            format_usd(line.unit_price),
            format_usd(line.subtotal())
        ]);
    }
    table.add_row(row!["", "", "", "Total", format_usd(bill.total())]);
    table
}

pub fn transactions_table(transactions: &[TransactionRecord]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["ID", "Total", "Created At", "Items"]);
    for tx in transactions {
        table.add_row(row![
            tx.id,
            format_usd(tx.total),
            tx.created_at.format("%Y-%m-%d %H:%M:%S"),
            tx.item_count()
        ]);
    }
    table
}

pub fn transaction_details(tx: &TransactionRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transaction ID: {}", tx.id);
    let _ = writeln!(out, "Total: {}", format_usd(tx.total));
    let _ = writeln!(out, "Date: {}", tx.created_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Items:");
    for item in &tx.items {
        let _ = writeln!(out, "- {}  x{}", item.name, item.quantity);
    }
    out
}

pub fn stats_summary(stats: &DashboardStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Products:        {}", stats.total_products);
    let _ = writeln!(out, "Low Stock Items (<5):  {}", stats.low_stock);
    let _ = writeln!(out, "Total Sales:           {}", stats.total_transactions);
    let _ = writeln!(out, "Total Revenue:         {}", stats.revenue_display());
    out
}

/// Horizontal bar chart of the revenue series, one row per day with
/// sales. Bars scale to the busiest day.
pub fn revenue_chart(series: &[DailyRevenue]) -> String {
    if series.is_empty() {
        return "No sales data available for this period.".to_string();
    }

    let max = series.iter().map(|p| p.revenue).fold(f64::MIN, f64::max);

    let mut out = String::new();
    for point in series {
        let width = if max > 0.0 {
            ((point.revenue / max) * CHART_WIDTH as f64).round().max(1.0) as usize
        } else {
            1
        };
        let _ = writeln!(
            out,
            "{}  {} {}",
            point.date,
            "#".repeat(width),
            format_usd(point.revenue)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_revenue_chart_scales_bars() {
        let series = vec![
            DailyRevenue {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                revenue: 10.0,
            },
            DailyRevenue {
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                revenue: 5.0,
            },
        ];

        let chart = revenue_chart(&series);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2024-01-01"));
        assert!(lines[0].contains(&"#".repeat(CHART_WIDTH)));
        assert!(lines[1].contains(&"#".repeat(CHART_WIDTH / 2)));
        assert!(lines[1].contains("$5.00"));
    }

    #[test]
    fn test_revenue_chart_empty_series() {
        assert_eq!(
            revenue_chart(&[]),
            "No sales data available for this period."
        );
    }

    #[test]
    fn test_transaction_details_lists_items() {
        use chrono::Utc;
        use domain::SaleItem;

        let tx = TransactionRecord {
            id: 3,
            total: 7.5,
            created_at: Utc::now(),
            items: vec![SaleItem {
                name: "Widget".into(),
                quantity: 3,
            }],
        };

        let details = transaction_details(&tx);
        assert!(details.contains("Transaction ID: 3"));
        assert!(details.contains("$7.50"));
        assert!(details.contains("- Widget  x3"));
    }
}
