//! Canonical date keys.
//!
//! Every dated record in the dashboard (writing sessions, checklist
//! completions, calendar notes, workouts, three-things entries) is bucketed
//! by a `YYYY-MM-DD` key in local time. This module is the only place that
//! produces or interprets those keys.

use chrono::{Days, Local, NaiveDate};

/// Format of a canonical date key.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Date key for the current local calendar day.
pub fn today_key() -> String {
  Local::now().date_naive().format(DATE_KEY_FORMAT).to_string()
}

/// Date key for the calendar day before `key`.
///
/// Returns `None` when `key` is not a well-formed date key. Callers treat a
/// malformed key the same as "no adjacent day", so streak logic degrades to
/// a restart instead of failing.
pub fn previous_day_key(key: &str) -> Option<String> {
  let date = parse_date_key(key)?;
  let previous = date.checked_sub_days(Days::new(1))?;
  Some(previous.format(DATE_KEY_FORMAT).to_string())
}

/// Date keys for `days` consecutive days ending at `key`, oldest first.
///
/// Used for weekly rollups (e.g. writing progress over the last 7 days).
/// Returns just `key` when it is malformed.
pub fn trailing_day_keys(key: &str, days: u64) -> Vec<String> {
  let Some(end) = parse_date_key(key) else {
    return vec![key.to_string()];
  };

  (0..days)
    .rev()
    .filter_map(|offset| end.checked_sub_days(Days::new(offset)))
    .map(|d| d.format(DATE_KEY_FORMAT).to_string())
    .collect()
}

/// Parse a canonical date key, rejecting anything that doesn't round-trip
/// (e.g. "2024-1-5" or "2024-01-05T12:00").
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_previous_day_simple() {
    assert_eq!(previous_day_key("2024-01-05"), Some("2024-01-04".into()));
  }

  #[test]
  fn test_previous_day_month_boundary() {
    assert_eq!(previous_day_key("2024-03-01"), Some("2024-02-29".into()));
    assert_eq!(previous_day_key("2023-03-01"), Some("2023-02-28".into()));
  }

  #[test]
  fn test_previous_day_year_boundary() {
    assert_eq!(previous_day_key("2024-01-01"), Some("2023-12-31".into()));
  }

  #[test]
  fn test_previous_day_malformed() {
    assert_eq!(previous_day_key(""), None);
    assert_eq!(previous_day_key("not-a-date"), None);
    assert_eq!(previous_day_key("2024-13-40"), None);
  }

  #[test]
  fn test_trailing_day_keys() {
    let keys = trailing_day_keys("2024-01-03", 3);
    assert_eq!(keys, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
  }

  #[test]
  fn test_trailing_day_keys_malformed() {
    assert_eq!(trailing_day_keys("garbage", 7), vec!["garbage"]);
  }

  #[test]
  fn test_today_key_shape() {
    let key = today_key();
    assert!(parse_date_key(&key).is_some());
  }
}
