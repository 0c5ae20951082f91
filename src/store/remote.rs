//! Remote document store backends.
//!
//! The dashboard's durable state is a single remote document per user,
//! holding one serialized text field per logical key. The backend supports
//! partial-field reads and partial-field merge-writes; it never interprets
//! field contents.

use color_eyre::{eyre::eyre, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use url::Url;

use crate::config::SyncConfig;

/// Contract for the remote document backing the cache.
///
/// A failed `load` or `merge_write` means the backend was unreachable or
/// rejected the request; callers degrade to local state and must never
/// treat it as fatal.
pub trait RemoteStore: Send + Sync + 'static {
  /// Fetch the full document as key → serialized value.
  /// A document that does not exist yet is an empty map, not an error.
  fn load(&self) -> impl Future<Output = Result<HashMap<String, String>>> + Send;

  /// Upsert a single field without disturbing other fields.
  /// Must not require a prior read.
  fn merge_write(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Wire shape of the remote document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RemoteDocument {
  #[serde(default)]
  fields: HashMap<String, String>,
}

/// HTTP backend: one JSON document per user at `{base_url}/documents/{user}`.
///
/// `GET` returns the document (404 when it has never been written);
/// `PATCH` with a partial `fields` body merges the given fields into it.
pub struct HttpRemoteStore {
  client: reqwest::Client,
  document_url: Url,
  token: Option<String>,
}

impl HttpRemoteStore {
  pub fn new(config: &SyncConfig, token: Option<String>) -> Result<Self> {
    let base = Url::parse(&config.url)
      .map_err(|e| eyre!("Invalid sync backend URL {}: {}", config.url, e))?;

    let document_url = base
      .join(&format!("documents/{}", config.user))
      .map_err(|e| eyre!("Failed to build document URL: {}", e))?;

    Ok(Self {
      client: reqwest::Client::new(),
      document_url,
      token,
    })
  }

  fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
    let mut req = self.client.request(method, self.document_url.clone());
    if let Some(token) = &self.token {
      req = req.bearer_auth(token);
    }
    req
  }
}

impl RemoteStore for HttpRemoteStore {
  async fn load(&self) -> Result<HashMap<String, String>> {
    let response = self
      .request(reqwest::Method::GET)
      .send()
      .await
      .map_err(|e| eyre!("Failed to reach sync backend: {}", e))?;

    if response.status() == StatusCode::NOT_FOUND {
      return Ok(HashMap::new());
    }

    let response = response
      .error_for_status()
      .map_err(|e| eyre!("Sync backend rejected load: {}", e))?;

    let document: RemoteDocument = response
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse remote document: {}", e))?;

    Ok(document.fields)
  }

  async fn merge_write(&self, key: &str, value: &str) -> Result<()> {
    let mut fields = HashMap::new();
    fields.insert(key.to_string(), value.to_string());

    self
      .request(reqwest::Method::PATCH)
      .json(&RemoteDocument { fields })
      .send()
      .await
      .map_err(|e| eyre!("Failed to reach sync backend: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Sync backend rejected write for {}: {}", key, e))?;

    Ok(())
  }
}

/// In-process backend used when no sync backend is configured.
///
/// State lives and dies with the process, so the dashboard works fully
/// unsynced. Also serves as the test double for the cache.
#[derive(Default)]
pub struct MemoryRemote {
  fields: Mutex<HashMap<String, String>>,
}

impl MemoryRemote {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed the document, as if a previous session had written it.
  pub fn with_fields(fields: HashMap<String, String>) -> Self {
    Self {
      fields: Mutex::new(fields),
    }
  }

  /// Read back a field, for assertions on background writes.
  pub fn field(&self, key: &str) -> Option<String> {
    self.fields.lock().ok().and_then(|f| f.get(key).cloned())
  }
}

impl RemoteStore for MemoryRemote {
  async fn load(&self) -> Result<HashMap<String, String>> {
    let fields = self
      .fields
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    Ok(fields.clone())
  }

  async fn merge_write(&self, key: &str, value: &str) -> Result<()> {
    let mut fields = self
      .fields
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    fields.insert(key.to_string(), value.to_string());
    Ok(())
  }
}
