//! Daily writing goal tracking.
//!
//! Word counts are bucketed per date key in `writingSessions`; the target
//! and its cadence live in `writingTarget` / `writingTargetType`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::date::{today_key, trailing_day_keys};
use crate::store::{keys, RemoteStore, SyncedCache};

/// Cadence the writing target is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetCadence {
  #[default]
  Daily,
  Weekly,
}

impl TargetCadence {
  pub fn as_str(&self) -> &'static str {
    match self {
      TargetCadence::Daily => "daily",
      TargetCadence::Weekly => "weekly",
    }
  }
}

/// Progress against the current target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritingProgress {
  pub words: u64,
  pub target: u64,
  pub cadence: TargetCadence,
}

const DEFAULT_TARGET: u64 = 500;

pub struct WritingLog<R: RemoteStore> {
  cache: Arc<SyncedCache<R>>,
}

impl<R: RemoteStore> WritingLog<R> {
  pub fn new(cache: Arc<SyncedCache<R>>) -> Self {
    Self { cache }
  }

  fn sessions(&self) -> BTreeMap<String, u64> {
    self.cache.get_as(keys::WRITING_SESSIONS, BTreeMap::new())
  }

  /// Add `words` to today's session.
  pub fn record(&self, words: u64) {
    let mut sessions = self.sessions();
    *sessions.entry(today_key()).or_insert(0) += words;
    self.cache.set_as(keys::WRITING_SESSIONS, &sessions);
  }

  /// Words written on a given day.
  pub fn words_on(&self, date_key: &str) -> u64 {
    self.sessions().get(date_key).copied().unwrap_or(0)
  }

  pub fn target(&self) -> u64 {
    self.cache.get_as(keys::WRITING_TARGET, DEFAULT_TARGET)
  }

  pub fn cadence(&self) -> TargetCadence {
    self
      .cache
      .get_as(keys::WRITING_TARGET_TYPE, TargetCadence::default())
  }

  pub fn set_target(&self, words: u64, cadence: TargetCadence) {
    self.cache.set_as(keys::WRITING_TARGET, &words);
    self.cache.set_as(keys::WRITING_TARGET_TYPE, &cadence);
  }

  /// Progress for the current cadence: today's words for a daily target,
  /// the trailing 7 days for a weekly one.
  pub fn progress(&self) -> WritingProgress {
    let cadence = self.cadence();
    let sessions = self.sessions();
    let words = match cadence {
      TargetCadence::Daily => sessions.get(&today_key()).copied().unwrap_or(0),
      TargetCadence::Weekly => trailing_day_keys(&today_key(), 7)
        .iter()
        .filter_map(|key| sessions.get(key))
        .sum(),
    };

    WritingProgress {
      words,
      target: self.target(),
      cadence,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryRemote;

  fn log() -> WritingLog<MemoryRemote> {
    WritingLog::new(Arc::new(SyncedCache::new(MemoryRemote::new())))
  }

  #[tokio::test]
  async fn test_record_accumulates_per_day() {
    let log = log();
    log.record(200);
    log.record(150);

    assert_eq!(log.words_on(&today_key()), 350);
    assert_eq!(log.words_on("1999-01-01"), 0);
  }

  #[tokio::test]
  async fn test_default_target() {
    let log = log();
    let progress = log.progress();
    assert_eq!(progress.target, DEFAULT_TARGET);
    assert_eq!(progress.cadence, TargetCadence::Daily);
    assert_eq!(progress.words, 0);
  }

  #[tokio::test]
  async fn test_set_target_round_trips() {
    let log = log();
    log.set_target(1000, TargetCadence::Weekly);

    assert_eq!(log.target(), 1000);
    assert_eq!(log.cadence(), TargetCadence::Weekly);
  }

  #[tokio::test]
  async fn test_weekly_progress_sums_trailing_days() {
    let log = log();
    log.set_target(1000, TargetCadence::Weekly);

    // Seed sessions directly: today plus a day inside and a day outside
    // the trailing week.
    let days = trailing_day_keys(&today_key(), 8);
    let mut sessions = BTreeMap::new();
    sessions.insert(days[7].clone(), 300u64); // today
    sessions.insert(days[1].clone(), 200); // 6 days ago, inside the window
    sessions.insert(days[0].clone(), 999); // 7 days ago, outside
    log.cache.set_as(keys::WRITING_SESSIONS, &sessions);

    assert_eq!(log.progress().words, 500);
  }
}
