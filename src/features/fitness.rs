//! Fitness log: exercise types, per-day workouts, and an activity streak.
//!
//! The streak advances on any day with at least one logged workout, using
//! the same streak procedure as the goal checklist but with its own
//! persisted state under `fitnessStreak`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::date::today_key;
use crate::store::{keys, RemoteStore, SyncedCache};
use crate::streak::{update_streak, StreakState};

type WorkoutsByDay = BTreeMap<String, Vec<String>>;

pub struct FitnessLog<R: RemoteStore> {
  cache: Arc<SyncedCache<R>>,
}

impl<R: RemoteStore> FitnessLog<R> {
  pub fn new(cache: Arc<SyncedCache<R>>) -> Self {
    Self { cache }
  }

  pub fn exercise_types(&self) -> Vec<String> {
    self.cache.get_as(keys::FITNESS_EXERCISE_TYPES, Vec::new())
  }

  /// Register an exercise type. Returns false when it already exists
  /// (case-insensitive).
  pub fn add_exercise_type(&self, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
      return false;
    }

    let mut types = self.exercise_types();
    if types.iter().any(|t| t.eq_ignore_ascii_case(name)) {
      return false;
    }
    types.push(name.to_string());
    self.cache.set_as(keys::FITNESS_EXERCISE_TYPES, &types);
    true
  }

  fn workouts(&self) -> WorkoutsByDay {
    self.cache.get_as(keys::FITNESS_WORKOUTS, WorkoutsByDay::new())
  }

  /// Log a workout for today and advance the streak. Unknown exercise
  /// types are registered on first use.
  pub fn log_workout(&self, exercise: &str) {
    self.add_exercise_type(exercise);

    let mut workouts = self.workouts();
    workouts
      .entry(today_key())
      .or_default()
      .push(exercise.trim().to_string());
    self.cache.set_as(keys::FITNESS_WORKOUTS, &workouts);

    let updated = update_streak(&self.streak(), true, &today_key());
    self.cache.set_as(keys::FITNESS_STREAK, &updated);
  }

  pub fn workouts_on(&self, date_key: &str) -> Vec<String> {
    self.workouts().get(date_key).cloned().unwrap_or_default()
  }

  pub fn streak(&self) -> StreakState {
    self.cache.get_as(keys::FITNESS_STREAK, StreakState::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryRemote;

  fn log() -> FitnessLog<MemoryRemote> {
    FitnessLog::new(Arc::new(SyncedCache::new(MemoryRemote::new())))
  }

  #[tokio::test]
  async fn test_log_workout_records_and_registers_type() {
    let log = log();
    log.log_workout("running");
    log.log_workout("yoga");
    log.log_workout("running");

    assert_eq!(log.workouts_on(&today_key()), vec!["running", "yoga", "running"]);
    assert_eq!(log.exercise_types(), vec!["running", "yoga"]);
  }

  #[tokio::test]
  async fn test_add_exercise_type_dedupes() {
    let log = log();
    assert!(log.add_exercise_type("Running"));
    assert!(!log.add_exercise_type("running"));
    assert!(!log.add_exercise_type("   "));
    assert_eq!(log.exercise_types(), vec!["Running"]);
  }

  #[tokio::test]
  async fn test_streak_counts_active_days_once() {
    let log = log();
    log.log_workout("running");
    log.log_workout("yoga");

    // Two workouts on the same day are one streak day.
    let streak = log.streak();
    assert_eq!(streak.count, 1);
    assert_eq!(streak.last_date, Some(today_key()));
  }

  #[tokio::test]
  async fn test_streak_continues_from_yesterday() {
    use crate::date::previous_day_key;

    let log = log();
    let yesterday = previous_day_key(&today_key()).unwrap();
    log.cache.set_as(
      keys::FITNESS_STREAK,
      &StreakState {
        count: 4,
        last_date: Some(yesterday),
      },
    );

    log.log_workout("running");
    assert_eq!(log.streak().count, 5);
  }
}
