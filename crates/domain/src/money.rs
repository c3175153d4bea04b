//! Display formatting for monetary amounts.

/// Render an amount the way the dashboard and bill views show it: `$12.50`.
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(10.0), "$10.00");
        assert_eq!(format_usd(9.999), "$10.00");
        assert_eq!(format_usd(1234.5), "$1234.50");
    }
}
