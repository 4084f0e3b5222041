use chrono::{Datelike, NaiveDate};

/// Prefix shared by every persisted day record.
pub const DAY_KEY_PREFIX: &str = "regulation_dailychecklist_state_";

pub fn day_key(date: NaiveDate) -> String {
    day_key_for(DAY_KEY_PREFIX, date)
}

pub fn day_key_for(prefix: &str, date: NaiveDate) -> String {
    format!(
        "{prefix}{}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}
