//! Token Store
//!
//! Process-wide holder of the access / refresh / FCM tokens.
//!
//! ## Invariants
//! - Every write goes through the store's write lock and is persisted before
//!   the lock is released, so readers never observe a half-written pair.
//! - A new value that cannot be persisted is not cached either. Clearing
//!   always clears the cache; a failed write is still reported.
//! - Absence of a refresh token means "logged out".
//! - The FCM token survives logout; only the auth pair is cleared.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access / refresh / FCM credential triple
///
/// Persisted with the keys `accessToken`, `refreshToken`, `fcmToken`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub fcm_token: Option<String>,
}

/// Error when loading or persisting tokens
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Token storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Token storage is corrupted: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Storage backends
// ============================================================================

/// Persistence backend for [`TokenStore`]
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Token, TokenStoreError>;
    fn save(&self, token: &Token) -> Result<(), TokenStoreError>;
}

/// JSON key-value file on disk
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Token, TokenStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Token::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &Token) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write-then-rename keeps the previous file intact on failure
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(token)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Volatile storage
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    inner: Mutex<Token>,
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Token, TokenStoreError> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, token: &Token) -> Result<(), TokenStoreError> {
        *self.inner.lock() = token.clone();
        Ok(())
    }
}

// ============================================================================
// TokenStore
// ============================================================================

/// Lock-guarded token cache in front of a persistence backend
pub struct TokenStore {
    cache: RwLock<Token>,
    storage: Box<dyn TokenStorage>,
}

impl TokenStore {
    /// Open the store, reading the persisted tokens
    pub fn open(storage: impl TokenStorage + 'static) -> Result<Self, TokenStoreError> {
        let token = storage.load()?;
        tracing::debug!(
            has_refresh_token = token.refresh_token.is_some(),
            has_fcm_token = token.fcm_token.is_some(),
            "Token store opened"
        );
        Ok(Self {
            cache: RwLock::new(token),
            storage: Box::new(storage),
        })
    }

    /// Store backed by memory only
    pub fn in_memory() -> Self {
        Self {
            cache: RwLock::new(Token::default()),
            storage: Box::new(MemoryTokenStorage::default()),
        }
    }

    pub fn snapshot(&self) -> Token {
        self.cache.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.cache.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.cache.read().refresh_token.clone()
    }

    pub fn fcm_token(&self) -> Option<String> {
        self.cache.read().fcm_token.clone()
    }

    /// Logged in iff a refresh token is stored
    pub fn is_logged_in(&self) -> bool {
        self.cache.read().refresh_token.is_some()
    }

    pub fn set_fcm_token(&self, fcm_token: impl Into<String>) -> Result<(), TokenStoreError> {
        let fcm_token = fcm_token.into();
        self.update(|token| token.fcm_token = Some(fcm_token))
    }

    /// Overwrite the auth pair (login, signup, reissue)
    pub fn store_pair(
        &self,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<(), TokenStoreError> {
        self.update(|token| {
            token.access_token = access_token;
            token.refresh_token = refresh_token;
        })
    }

    /// Drop the refresh token (logout, resign)
    pub fn clear_refresh_token(&self) -> Result<(), TokenStoreError> {
        self.forget(|token| token.refresh_token = None)
    }

    /// Drop the whole auth pair (failed reissue)
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        self.forget(|token| {
            token.access_token = None;
            token.refresh_token = None;
        })
    }

    /// New values reach the cache only once persisted
    fn update(&self, f: impl FnOnce(&mut Token)) -> Result<(), TokenStoreError> {
        let mut guard = self.cache.write();
        let mut next = guard.clone();
        f(&mut next);
        self.storage.save(&next).map_err(|e| {
            tracing::error!(error = %e, "Failed to persist tokens");
            e
        })?;
        *guard = next;
        Ok(())
    }

    /// Removals apply to the cache even when the write fails
    fn forget(&self, f: impl FnOnce(&mut Token)) -> Result<(), TokenStoreError> {
        let mut guard = self.cache.write();
        f(&mut guard);
        self.storage.save(&guard).map_err(|e| {
            tracing::error!(error = %e, "Failed to persist cleared tokens");
            e
        })
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = self.cache.read();
        f.debug_struct("TokenStore")
            .field("has_access_token", &token.access_token.is_some())
            .field("has_refresh_token", &token.refresh_token.is_some())
            .field("has_fcm_token", &token.fcm_token.is_some())
            .finish()
    }
}
