use chrono::{DateTime, NaiveDate, Utc};

/// "Nov 14, 2023"
#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_day(value: DateTime<Utc>) -> String {
    format_date(value.date_naive())
}

/// Whole seconds as `mm:ss`.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
