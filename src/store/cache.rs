//! In-memory cache synchronized with the remote document.
//!
//! The cache is loaded once at boot and is the authoritative state for the
//! running session: reads are synchronous and total, writes land in memory
//! immediately and are mirrored to the remote store by a detached background
//! task per key. Remote failures degrade to local state and a log line;
//! nothing here ever surfaces an error into the caller's flow.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::remote::RemoteStore;

/// Outcome of decoding a remote field's serialized text.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedField {
  /// The text parsed as JSON.
  Decoded(Value),
  /// The text was not valid JSON; kept verbatim.
  Raw(String),
}

impl DecodedField {
  pub fn into_value(self) -> Value {
    match self {
      DecodedField::Decoded(value) => value,
      DecodedField::Raw(text) => Value::String(text),
    }
  }
}

/// Decode a remote field, falling back to the raw text.
///
/// Older clients wrote some fields as bare strings rather than JSON, so an
/// unparseable field is data, not an error.
pub fn decode_field(raw: &str) -> DecodedField {
  match serde_json::from_str(raw) {
    Ok(value) => DecodedField::Decoded(value),
    Err(_) => DecodedField::Raw(raw.to_string()),
  }
}

/// Key/value cache with write-behind remote sync.
pub struct SyncedCache<R: RemoteStore> {
  remote: Arc<R>,
  entries: Mutex<HashMap<String, Value>>,
}

impl<R: RemoteStore> SyncedCache<R> {
  /// Create an empty cache over the given remote store.
  /// Call [`initialize`](Self::initialize) before serving reads.
  pub fn new(remote: R) -> Self {
    Self {
      remote: Arc::new(remote),
      entries: Mutex::new(HashMap::new()),
    }
  }

  /// Load the remote document into memory, once, at boot.
  ///
  /// Each field is decoded with raw-text fallback. When the remote is
  /// unavailable the cache stays empty and the app proceeds degraded;
  /// boot is never blocked beyond this one attempt.
  pub async fn initialize(&self) {
    match self.remote.load().await {
      Ok(fields) => {
        let mut entries = match self.entries.lock() {
          Ok(entries) => entries,
          Err(poisoned) => poisoned.into_inner(),
        };
        for (key, raw) in fields {
          entries.insert(key, decode_field(&raw).into_value());
        }
        tracing::debug!("loaded {} fields from remote document", entries.len());
      }
      Err(err) => {
        tracing::warn!("remote load failed, starting with empty state: {:#}", err);
      }
    }
  }

  /// Cached value for `key`, or `fallback` when absent.
  pub fn get(&self, key: &str, fallback: Value) -> Value {
    let entries = match self.entries.lock() {
      Ok(entries) => entries,
      Err(poisoned) => poisoned.into_inner(),
    };
    entries.get(key).cloned().unwrap_or(fallback)
  }

  /// Write `value` into memory and mirror it to the remote store.
  ///
  /// The in-memory write is visible to subsequent `get` calls before this
  /// function returns. The remote merge-write runs as a detached task:
  /// per-key dispatch follows `set` call order, completion order is
  /// unspecified, and a failed write is logged but never rolled back.
  pub fn set(&self, key: &str, value: Value) {
    let serialized = value.to_string();

    {
      let mut entries = match self.entries.lock() {
        Ok(entries) => entries,
        Err(poisoned) => poisoned.into_inner(),
      };
      entries.insert(key.to_string(), value);
    }

    // set() is callable from synchronous call sites, so look the runtime up
    // rather than requiring an async context.
    let handle = match tokio::runtime::Handle::try_current() {
      Ok(handle) => handle,
      Err(_) => {
        tracing::warn!("no async runtime, skipping background write for {}", key);
        return;
      }
    };

    let remote = Arc::clone(&self.remote);
    let key = key.to_string();
    handle.spawn(async move {
      if let Err(err) = remote.merge_write(&key, &serialized).await {
        tracing::warn!("background write for {} failed: {:#}", key, err);
      }
    });
  }

  /// Typed read: deserialize the cached value, or return `fallback` when
  /// the key is absent or the stored shape doesn't match.
  pub fn get_as<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
    let value = self.get(key, Value::Null);
    if value.is_null() {
      return fallback;
    }
    serde_json::from_value(value).unwrap_or(fallback)
  }

  /// Typed write via [`set`](Self::set).
  ///
  /// Serialization of a feature model only fails for non-JSON-representable
  /// types; if it somehow does, the write is dropped with a log line rather
  /// than interrupting the caller.
  pub fn set_as<T: Serialize>(&self, key: &str, value: &T) {
    match serde_json::to_value(value) {
      Ok(value) => self.set(key, value),
      Err(err) => {
        tracing::error!("failed to serialize value for {}: {}", key, err);
      }
    }
  }
}
