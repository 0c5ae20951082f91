//! Calendar notes, one free-text note per day.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::store::{keys, RemoteStore, SyncedCache};

type NotesByDay = BTreeMap<String, String>;

pub struct CalendarNotes<R: RemoteStore> {
  cache: Arc<SyncedCache<R>>,
}

impl<R: RemoteStore> CalendarNotes<R> {
  pub fn new(cache: Arc<SyncedCache<R>>) -> Self {
    Self { cache }
  }

  fn notes(&self) -> NotesByDay {
    self.cache.get_as(keys::CALENDAR_NOTES, NotesByDay::new())
  }

  pub fn note_for(&self, date_key: &str) -> Option<String> {
    self.notes().get(date_key).cloned()
  }

  /// Set the note for a day; an empty note clears the entry.
  pub fn set_note(&self, date_key: &str, text: &str) {
    let mut notes = self.notes();
    if text.is_empty() {
      notes.remove(date_key);
    } else {
      notes.insert(date_key.to_string(), text.to_string());
    }
    self.cache.set_as(keys::CALENDAR_NOTES, &notes);
  }

  /// All noted days, oldest first.
  pub fn all(&self) -> Vec<(String, String)> {
    self.notes().into_iter().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryRemote;

  fn calendar() -> CalendarNotes<MemoryRemote> {
    CalendarNotes::new(Arc::new(SyncedCache::new(MemoryRemote::new())))
  }

  #[tokio::test]
  async fn test_set_and_get_note() {
    let cal = calendar();
    cal.set_note("2024-01-05", "dentist at 3pm");

    assert_eq!(cal.note_for("2024-01-05"), Some("dentist at 3pm".into()));
    assert_eq!(cal.note_for("2024-01-06"), None);
  }

  #[tokio::test]
  async fn test_empty_note_clears_entry() {
    let cal = calendar();
    cal.set_note("2024-01-05", "draft");
    cal.set_note("2024-01-05", "");

    assert_eq!(cal.note_for("2024-01-05"), None);
    assert!(cal.all().is_empty());
  }

  #[tokio::test]
  async fn test_all_is_ordered_by_day() {
    let cal = calendar();
    cal.set_note("2024-02-01", "b");
    cal.set_note("2024-01-05", "a");

    let days: Vec<String> = cal.all().into_iter().map(|(d, _)| d).collect();
    assert_eq!(days, vec!["2024-01-05", "2024-02-01"]);
  }
}
