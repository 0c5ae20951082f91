//! Synchronized key/value store backing every dashboard feature.
//!
//! This module provides:
//! - A remote document store contract with HTTP and in-memory backends
//! - An in-memory cache loaded once at boot, serving synchronous reads
//!   and dispatching background merge-writes per key
//! - Decode-or-fallback handling for remote field values
//!
//! Features never talk to the remote store directly; everything goes
//! through [`SyncedCache::get`] and [`SyncedCache::set`].

mod cache;
pub mod keys;
mod remote;

pub use cache::{decode_field, DecodedField, SyncedCache};
pub use remote::{HttpRemoteStore, MemoryRemote, RemoteStore};
