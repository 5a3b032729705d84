use chrono::{NaiveDate, Utc};

use crate::domain::a004_transaction::repository;

/// Date of the first transaction; today for an empty book.
pub async fn get_earliest_date() -> anyhow::Result<NaiveDate> {
    let earliest = repository::earliest_date().await?;
    Ok(earliest_or_today(earliest, Utc::now().date_naive()))
}

fn earliest_or_today(earliest: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    earliest.unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_book_falls_back_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(earliest_or_today(None, today), today);

        let first = NaiveDate::from_ymd_opt(2019, 2, 3).unwrap();
        assert_eq!(earliest_or_today(Some(first), today), first);
    }
}
