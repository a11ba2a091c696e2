//! # Session Storage
//!
//! Per-user key/value store mirroring the two browser storage scopes the
//! merchant UI relies on:
//!
//! - [`StorageScope::Persistent`] — a JSON map flushed to
//!   `<data_dir>/session.json`, surviving restarts (the `localStorage`
//!   analog). Holds the connected wallet type, address and session key.
//! - [`StorageScope::Session`] — in-memory only, dying with the process
//!   (the `sessionStorage` analog). Holds the bearer API token.
//!
//! Storage failures are swallowed by design: a failed flush logs a warning
//! and the in-memory value stands. Concurrent processes sharing the same
//! data directory can race on the file; that is an accepted limitation,
//! matching the multi-tab behavior of the original storage keys.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::dto::auth::AuthBody;

/// Fixed storage keys. Format is opaque strings, no versioning.
pub mod keys {
    /// Which wallet brand produced the current session.
    pub const WALLET_TYPE: &str = "connectedWalletType";
    /// Base58 public key of the connected wallet.
    pub const WALLET_ADDRESS: &str = "connectedWalletAddress";
    /// Opaque server-issued session key.
    pub const SESSION_KEY: &str = "sessionKey";
    /// Bearer token for the generic API client (session scope).
    pub const AUTH_TOKEN: &str = "auth_token";
}

/// Storage scope: whether a value survives a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    /// Flushed to disk; survives restarts.
    Persistent,
    /// In-memory; dies with the process.
    Session,
}

struct StoreInner {
    /// `None` for in-memory stores (tests, ephemeral runs).
    path: Option<PathBuf>,
    persistent: RwLock<BTreeMap<String, String>>,
    session: RwLock<BTreeMap<String, String>>,
}

/// Two-scope key/value store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Open the store backed by `<data_dir>/session.json`, loading any
    /// persisted values. A missing or unreadable file yields an empty
    /// store; the error is logged and swallowed.
    pub fn open(data_dir: &std::path::Path) -> Self {
        let path = data_dir.join("session.json");

        let persistent = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<BTreeMap<String, String>>(&contents)
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, path = %path.display(), "Discarding corrupt session file");
                    BTreeMap::new()
                }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Failed to read session file");
                BTreeMap::new()
            }
        };

        Self {
            inner: Arc::new(StoreInner {
                path: Some(path),
                persistent: RwLock::new(persistent),
                session: RwLock::new(BTreeMap::new()),
            }),
        }
    }

    /// An unbacked store where both scopes are in-memory. Used by tests
    /// and ephemeral runs.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: None,
                persistent: RwLock::new(BTreeMap::new()),
                session: RwLock::new(BTreeMap::new()),
            }),
        }
    }

    /// Read a value.
    pub fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
        let map = match scope {
            StorageScope::Persistent => self.inner.persistent.read(),
            StorageScope::Session => self.inner.session.read(),
        };
        map.get(key).cloned()
    }

    /// Write a value. Persistent writes are flushed to disk; flush errors
    /// are logged and swallowed.
    pub fn set(&self, scope: StorageScope, key: &str, value: &str) {
        match scope {
            StorageScope::Persistent => {
                self.inner
                    .persistent
                    .write()
                    .insert(key.to_string(), value.to_string());
                self.flush();
            }
            StorageScope::Session => {
                self.inner
                    .session
                    .write()
                    .insert(key.to_string(), value.to_string());
            }
        }
    }

    /// Remove a value. Missing keys are not an error.
    pub fn remove(&self, scope: StorageScope, key: &str) {
        match scope {
            StorageScope::Persistent => {
                self.inner.persistent.write().remove(key);
                self.flush();
            }
            StorageScope::Session => {
                self.inner.session.write().remove(key);
            }
        }
    }

    fn flush(&self) {
        let Some(path) = self.inner.path.as_ref() else {
            return;
        };

        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!(error = %e, "Failed to create data directory");
                return;
            }
        }

        let snapshot = self.inner.persistent.read().clone();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!(error = %e, path = %path.display(), "Failed to flush session file");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize session state"),
        }
    }
}

/// Wallet session snapshot; either field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionData {
    pub address: Option<String>,
    pub key: Option<String>,
}

/// Wallet session bookkeeping on top of [`SessionStore`].
///
/// Authentication is binary: both the address and the session key must be
/// present and non-empty.
#[derive(Clone)]
pub struct AuthStore {
    store: SessionStore,
}

impl AuthStore {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Persist the wallet address and session key.
    pub fn set_session(&self, address: &str, key: &str) {
        self.store
            .set(StorageScope::Persistent, keys::WALLET_ADDRESS, address);
        self.store
            .set(StorageScope::Persistent, keys::SESSION_KEY, key);
    }

    /// Current session, with possibly-missing fields.
    pub fn get_session(&self) -> SessionData {
        SessionData {
            address: self.store.get(StorageScope::Persistent, keys::WALLET_ADDRESS),
            key: self.store.get(StorageScope::Persistent, keys::SESSION_KEY),
        }
    }

    /// Remove both session fields.
    pub fn clear_session(&self) {
        self.store.remove(StorageScope::Persistent, keys::WALLET_ADDRESS);
        self.store.remove(StorageScope::Persistent, keys::SESSION_KEY);
    }

    /// True iff both the address and the session key are present and
    /// non-empty.
    pub fn is_authenticated(&self) -> bool {
        let session = self.get_session();
        matches!(
            (session.address.as_deref(), session.key.as_deref()),
            (Some(address), Some(key)) if !address.is_empty() && !key.is_empty()
        )
    }

    /// Credentials for merchant request bodies, if authenticated.
    pub fn auth_body(&self) -> Option<AuthBody> {
        let session = self.get_session();
        match (session.address, session.key) {
            (Some(wallet_address), Some(session_key))
                if !wallet_address.is_empty() && !session_key.is_empty() =>
            {
                Some(AuthBody {
                    wallet_address,
                    session_key,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cryptonow-store-test-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn persistent_scope_survives_reopen() {
        let dir = temp_dir();

        let store = SessionStore::open(&dir);
        store.set(StorageScope::Persistent, keys::WALLET_ADDRESS, "Addr1");
        drop(store);

        let reopened = SessionStore::open(&dir);
        assert_eq!(
            reopened.get(StorageScope::Persistent, keys::WALLET_ADDRESS),
            Some("Addr1".to_string())
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn session_scope_does_not_survive_reopen() {
        let dir = temp_dir();

        let store = SessionStore::open(&dir);
        store.set(StorageScope::Session, keys::AUTH_TOKEN, "tok");
        assert_eq!(
            store.get(StorageScope::Session, keys::AUTH_TOKEN),
            Some("tok".to_string())
        );
        drop(store);

        let reopened = SessionStore::open(&dir);
        assert_eq!(reopened.get(StorageScope::Session, keys::AUTH_TOKEN), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::in_memory();
        let clone = store.clone();
        clone.set(StorageScope::Session, "k", "v");
        assert_eq!(store.get(StorageScope::Session, "k"), Some("v".to_string()));
    }

    #[test]
    fn is_authenticated_requires_both_fields() {
        let auth = AuthStore::new(SessionStore::in_memory());
        assert!(!auth.is_authenticated());

        auth.set_session("Addr1", "key1");
        assert!(auth.is_authenticated());

        auth.store.remove(StorageScope::Persistent, keys::SESSION_KEY);
        assert!(!auth.is_authenticated());

        auth.set_session("Addr1", "key1");
        auth.store
            .remove(StorageScope::Persistent, keys::WALLET_ADDRESS);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn empty_fields_do_not_authenticate() {
        let auth = AuthStore::new(SessionStore::in_memory());
        auth.set_session("", "key1");
        assert!(!auth.is_authenticated());
        assert!(auth.auth_body().is_none());
    }

    #[test]
    fn clear_session_removes_both() {
        let auth = AuthStore::new(SessionStore::in_memory());
        auth.set_session("Addr1", "key1");
        auth.clear_session();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.get_session(), SessionData::default());
    }

    #[test]
    fn auth_body_round_trip() {
        let auth = AuthStore::new(SessionStore::in_memory());
        auth.set_session("Addr1", "key1");
        let body = auth.auth_body().unwrap();
        assert_eq!(body.wallet_address, "Addr1");
        assert_eq!(body.session_key, "key1");
    }
}
