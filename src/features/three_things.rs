//! The "three things today" ritual: up to three focus items per day.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::date::today_key;
use crate::store::{keys, RemoteStore, SyncedCache};

/// Maximum entries per day; extras are truncated on write.
pub const MAX_THINGS: usize = 3;

type ThingsByDay = BTreeMap<String, Vec<String>>;

pub struct ThreeThings<R: RemoteStore> {
  cache: Arc<SyncedCache<R>>,
}

impl<R: RemoteStore> ThreeThings<R> {
  pub fn new(cache: Arc<SyncedCache<R>>) -> Self {
    Self { cache }
  }

  fn by_day(&self) -> ThingsByDay {
    self.cache.get_as(keys::THREE_THINGS, ThingsByDay::new())
  }

  /// Replace today's entries. Blank entries are dropped, the rest capped
  /// at [`MAX_THINGS`].
  pub fn set_today(&self, things: &[String]) {
    let entries: Vec<String> = things
      .iter()
      .map(|t| t.trim().to_string())
      .filter(|t| !t.is_empty())
      .take(MAX_THINGS)
      .collect();

    let mut by_day = self.by_day();
    if entries.is_empty() {
      by_day.remove(&today_key());
    } else {
      by_day.insert(today_key(), entries);
    }
    self.cache.set_as(keys::THREE_THINGS, &by_day);
  }

  pub fn for_day(&self, date_key: &str) -> Vec<String> {
    self.by_day().get(date_key).cloned().unwrap_or_default()
  }

  pub fn today(&self) -> Vec<String> {
    self.for_day(&today_key())
  }
}
