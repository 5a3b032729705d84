/// Utilities for date and amount formatting
///
/// Provides consistent formatting across the dashboard pages
use chrono::NaiveDate;

/// Format a date as "15 Mar 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Parse a month key "MM/YYYY" into (year, month)
pub fn parse_month_key(key: &str) -> Option<(i32, u32)> {
    let (month, year) = key.split_once('/')?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// Format a month key "03/2024" as "Mar 2024"; unknown keys are returned as is
pub fn format_month_key(key: &str) -> String {
    parse_month_key(key)
        .and_then(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Month keys in chronological order, duplicates removed
pub fn sort_month_keys<'a>(keys: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut keys: Vec<String> = keys.into_iter().cloned().collect();
    keys.sort_by_key(|k| parse_month_key(k).unwrap_or((i32::MAX, 0)));
    keys.dedup();
    keys
}

/// Format an amount with two decimals and a thin thousands separator
/// Example: -1234567.891 -> "-1 234 567.89"
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(d), "05 Mar 2024");
    }

    #[test]
    fn test_month_keys() {
        assert_eq!(parse_month_key("03/2024"), Some((2024, 3)));
        assert_eq!(parse_month_key("13/2024"), None);
        assert_eq!(format_month_key("12/2023"), "Dec 2023");
        assert_eq!(format_month_key("invalid"), "invalid");

        let keys = vec![
            "02/2024".to_string(),
            "11/2023".to_string(),
            "01/2024".to_string(),
            "02/2024".to_string(),
        ];
        assert_eq!(sort_month_keys(&keys), vec!["11/2023", "01/2024", "02/2024"]);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(1234567.891), "1 234 567.89");
        assert_eq!(format_amount(-2500.0), "-2 500.00");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_amount(999.5), "999.50");
    }
}
