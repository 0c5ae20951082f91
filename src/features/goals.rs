//! Checklist-based habit goals with an achievement streak.
//!
//! The goal list lives in `dailyGoals`, per-day checkmarks in
//! `dailyChecked`, and the streak of all-goals-checked days in
//! `achievementStreak`. Every toggle re-evaluates completion for today and
//! feeds it into the shared streak procedure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::date::today_key;
use crate::store::{keys, RemoteStore, SyncedCache};
use crate::streak::{update_streak, StreakState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
  pub id: u64,
  pub text: String,
}

type CheckedByDay = BTreeMap<String, Vec<u64>>;

pub struct GoalChecklist<R: RemoteStore> {
  cache: Arc<SyncedCache<R>>,
}

impl<R: RemoteStore> GoalChecklist<R> {
  pub fn new(cache: Arc<SyncedCache<R>>) -> Self {
    Self { cache }
  }

  pub fn goals(&self) -> Vec<Goal> {
    self.cache.get_as(keys::DAILY_GOALS, Vec::new())
  }

  fn checked_by_day(&self) -> CheckedByDay {
    self.cache.get_as(keys::DAILY_CHECKED, CheckedByDay::new())
  }

  /// Add a goal and return it. Ids are one past the current maximum, so
  /// they stay unique within the live list.
  pub fn add(&self, text: &str) -> Goal {
    let mut goals = self.goals();
    let id = goals.iter().map(|g| g.id).max().unwrap_or(0) + 1;
    let goal = Goal {
      id,
      text: text.to_string(),
    };
    goals.push(goal.clone());
    self.cache.set_as(keys::DAILY_GOALS, &goals);
    goal
  }

  /// Remove a goal. Past checkmarks for it are left in place; they are
  /// ignored by completion checks because those only look at current goals.
  pub fn remove(&self, id: u64) -> bool {
    let mut goals = self.goals();
    let before = goals.len();
    goals.retain(|g| g.id != id);
    if goals.len() == before {
      return false;
    }
    self.cache.set_as(keys::DAILY_GOALS, &goals);
    self.refresh_streak();
    true
  }

  /// Checked goal ids for a day.
  pub fn checked_on(&self, date_key: &str) -> Vec<u64> {
    self
      .checked_by_day()
      .get(date_key)
      .cloned()
      .unwrap_or_default()
  }

  /// Toggle a goal for today, then re-evaluate the achievement streak.
  /// Returns the new checked state, or `None` for an unknown goal id.
  pub fn toggle(&self, id: u64) -> Option<bool> {
    if !self.goals().iter().any(|g| g.id == id) {
      return None;
    }

    let today = today_key();
    let mut checked = self.checked_by_day();
    let day = checked.entry(today).or_default();

    let now_checked = if let Some(pos) = day.iter().position(|&c| c == id) {
      day.remove(pos);
      false
    } else {
      day.push(id);
      true
    };

    self.cache.set_as(keys::DAILY_CHECKED, &checked);
    self.refresh_streak();
    Some(now_checked)
  }

  /// Whether every current goal is checked today. An empty goal list never
  /// counts as complete.
  pub fn all_complete_today(&self) -> bool {
    let goals = self.goals();
    if goals.is_empty() {
      return false;
    }
    let checked = self.checked_on(&today_key());
    goals.iter().all(|g| checked.contains(&g.id))
  }

  pub fn streak(&self) -> StreakState {
    self.cache.get_as(keys::ACHIEVEMENT_STREAK, StreakState::default())
  }

  fn refresh_streak(&self) {
    let updated = update_streak(&self.streak(), self.all_complete_today(), &today_key());
    self.cache.set_as(keys::ACHIEVEMENT_STREAK, &updated);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryRemote;

  fn checklist() -> GoalChecklist<MemoryRemote> {
    GoalChecklist::new(Arc::new(SyncedCache::new(MemoryRemote::new())))
  }

  #[tokio::test]
  async fn test_add_assigns_increasing_ids() {
    let list = checklist();
    let a = list.add("read 30 minutes");
    let b = list.add("stretch");

    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(list.goals().len(), 2);
  }

  #[tokio::test]
  async fn test_toggle_checks_and_unchecks() {
    let list = checklist();
    let goal = list.add("read");

    assert_eq!(list.toggle(goal.id), Some(true));
    assert_eq!(list.checked_on(&today_key()), vec![goal.id]);

    assert_eq!(list.toggle(goal.id), Some(false));
    assert!(list.checked_on(&today_key()).is_empty());

    assert_eq!(list.toggle(999), None);
  }

  #[tokio::test]
  async fn test_streak_increments_once_when_all_complete() {
    let list = checklist();
    let a = list.add("read");
    let b = list.add("stretch");

    list.toggle(a.id);
    assert_eq!(list.streak().count, 0);

    list.toggle(b.id);
    assert_eq!(list.streak().count, 1);
    assert_eq!(list.streak().last_date, Some(today_key()));

    // Re-toggling the same day must not double-count.
    list.toggle(b.id);
    list.toggle(b.id);
    assert_eq!(list.streak().count, 1);
  }

  #[tokio::test]
  async fn test_empty_goal_list_is_never_complete() {
    let list = checklist();
    assert!(!list.all_complete_today());
  }

  #[tokio::test]
  async fn test_remove_can_complete_today() {
    let list = checklist();
    let a = list.add("read");
    let b = list.add("stretch");

    list.toggle(a.id);
    assert!(!list.all_complete_today());

    // Dropping the unchecked goal leaves only checked ones.
    list.remove(b.id);
    assert!(list.all_complete_today());
    assert_eq!(list.streak().count, 1);
  }
}
