//! Consecutive-day streak computation.
//!
//! A streak is the count of consecutive calendar days on which a completion
//! condition held, broken by any skipped day. The same procedure is used by
//! the achievement-goal and fitness features, each with its own persisted
//! state; the two streaks never share state or reset rules.

use serde::{Deserialize, Serialize};

use crate::date::previous_day_key;

/// Persisted streak state.
///
/// `last_date` is the date key of the most recent completed day, absent when
/// the streak has never been started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
  #[serde(default)]
  pub count: u32,
  #[serde(default)]
  pub last_date: Option<String>,
}

/// Advance `state` for a completion check on `today_key`.
///
/// - Not completed: state is unchanged. A streak is never broken
///   retroactively by a day without activity; only a later completion
///   re-evaluates it.
/// - Already counted for `today_key`: unchanged (calling twice in one day
///   must not double-increment).
/// - Last completion was yesterday, or the streak is fresh: count + 1.
/// - Anything else (a gap, or an unparseable last date): restart at 1.
pub fn update_streak(state: &StreakState, completed_today: bool, today_key: &str) -> StreakState {
  if !completed_today {
    return state.clone();
  }

  if state.last_date.as_deref() == Some(today_key) {
    return state.clone();
  }

  let yesterday = previous_day_key(today_key);
  let continues = state.last_date.is_some() && state.last_date == yesterday;

  if continues || state.count == 0 {
    StreakState {
      count: state.count + 1,
      last_date: Some(today_key.to_string()),
    }
  } else {
    StreakState {
      count: 1,
      last_date: Some(today_key.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn state(count: u32, last_date: Option<&str>) -> StreakState {
    StreakState {
      count,
      last_date: last_date.map(String::from),
    }
  }

  #[test]
  fn test_first_increment() {
    let updated = update_streak(&state(0, None), true, "2024-01-05");
    assert_eq!(updated, state(1, Some("2024-01-05")));
  }

  #[test]
  fn test_continuation() {
    let updated = update_streak(&state(3, Some("2024-01-04")), true, "2024-01-05");
    assert_eq!(updated, state(4, Some("2024-01-05")));
  }

  #[test]
  fn test_reset_on_gap() {
    let updated = update_streak(&state(5, Some("2024-01-01")), true, "2024-01-05");
    assert_eq!(updated, state(1, Some("2024-01-05")));
  }

  #[test]
  fn test_same_day_idempotent() {
    let first = update_streak(&state(3, Some("2024-01-04")), true, "2024-01-05");
    let second = update_streak(&first, true, "2024-01-05");
    assert_eq!(first, second);
    assert_eq!(second.count, 4);
  }

  #[test]
  fn test_no_completion_no_change() {
    let s = state(5, Some("2024-01-01"));
    assert_eq!(update_streak(&s, false, "2024-01-05"), s);

    let fresh = state(0, None);
    assert_eq!(update_streak(&fresh, false, "2024-01-05"), fresh);
  }

  #[test]
  fn test_month_boundary_continuation() {
    let updated = update_streak(&state(10, Some("2024-02-29")), true, "2024-03-01");
    assert_eq!(updated, state(11, Some("2024-03-01")));
  }

  #[test]
  fn test_malformed_last_date_restarts() {
    let updated = update_streak(&state(7, Some("not-a-date")), true, "2024-01-05");
    assert_eq!(updated, state(1, Some("2024-01-05")));
  }

  #[test]
  fn test_stale_count_zero_increments() {
    // count == 0 with a stale last_date still counts as a fresh start
    let updated = update_streak(&state(0, Some("2023-06-01")), true, "2024-01-05");
    assert_eq!(updated, state(1, Some("2024-01-05")));
  }
}
