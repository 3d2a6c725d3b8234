use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::prelude::*;
use rand::RngCore;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::CachedUser;

const NONCE_LEN: usize = 12;
const KEY_SALT: &[u8] = b"Holidaze-session-encryption-v1";

/// A cached profile older than this is resynced from the API
pub const SESSION_PROFILE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Could not encrypt the session token")]
    Encryption,
    #[error("Stored session is unreadable: {0}")]
    Corrupt(String),
}

/// Signed-in user as persisted between launches
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: CachedUser,
    /// Unix timestamp of the last profile sync
    pub synced_at: i64,
}

impl Session {
    pub fn new(token: impl Into<String>, user: CachedUser) -> Self {
        Self {
            token: token.into(),
            user,
            synced_at: now(),
        }
    }

    pub fn is_stale_at(&self, at: i64) -> bool {
        at - self.synced_at >= SESSION_PROFILE_TTL.as_secs() as i64
    }

    pub fn is_stale(&self) -> bool {
        self.is_stale_at(now())
    }

    /// Swap in a freshly fetched profile
    pub fn refresh_user(&mut self, user: CachedUser) {
        self.user = user;
        self.synced_at = now();
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// 32-byte key from the machine fingerprint
fn derive_key() -> [u8; 32] {
    let fp = crate::utils::fingerprint::fingerprint();
    let mut hasher = Sha256::new();
    hasher.update(fp.as_bytes());
    hasher.update(KEY_SALT);
    let mut key = [0u8; 32];
    key.copy_from_slice(&hasher.finalize());
    key
}

fn cipher() -> Aes256Gcm {
    Aes256Gcm::new(&Key::<Aes256Gcm>::from(derive_key()))
}

/// nonce || ciphertext, base64 encoded
fn encrypt_text(plain: &str) -> Result<String, StoreError> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher()
        .encrypt(&Nonce::from(nonce_bytes), plain.as_bytes())
        .map_err(|_| StoreError::Encryption)?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(BASE64_STANDARD.encode(output))
}

fn decrypt_text(encoded: &str) -> Option<String> {
    let raw = BASE64_STANDARD.decode(encoded).ok()?;
    if raw.len() <= NONCE_LEN {
        return None;
    }
    let (nonce_bytes, cipher_bytes) = raw.split_at(NONCE_LEN);
    let nonce_array: [u8; NONCE_LEN] = nonce_bytes.try_into().ok()?;

    cipher()
        .decrypt(&Nonce::from(nonce_array), cipher_bytes)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

/// Single-row SQLite store for the signed-in session. The token is encrypted at rest.
#[derive(Clone)]
pub struct SessionStore {
    db_path: PathBuf,
}

impl SessionStore {
    pub fn new() -> Self {
        let db_path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Holidaze")
            .join("session.db");
        Self::with_path(db_path)
    }

    pub fn with_path(db_path: impl Into<PathBuf>) -> Self {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let store = Self { db_path };
        if let Err(e) = store.init_schema() {
            log::error!("[Session] Failed to initialise session database: {}", e);
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connection(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.db_path)?)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.connection()?.execute(
            "CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                token TEXT NOT NULL,
                user_json TEXT NOT NULL,
                synced_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        self.connection()?.execute(
            "INSERT OR REPLACE INTO session (id, token, user_json, synced_at) VALUES (1, ?1, ?2, ?3)",
            params![encrypt_text(&session.token)?, user_json, session.synced_at],
        )?;

        log::info!("[Session] Saved session for {}", session.user.name);
        Ok(())
    }

    /// Stored session, or `None` when there is none or it cannot be read
    pub fn load(&self) -> Option<Session> {
        match self.try_load() {
            Ok(session) => session,
            Err(e) => {
                log::warn!("[Session] Discarding unreadable session: {}", e);
                let _ = self.clear();
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<Session>, StoreError> {
        let row = self
            .connection()?
            .query_row(
                "SELECT token, user_json, synced_at FROM session WHERE id = 1",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, i64>(2)?)),
            )
            .optional()?;

        let Some((encrypted_token, user_json, synced_at)) = row else {
            return Ok(None);
        };

        let token = decrypt_text(&encrypted_token)
            .ok_or_else(|| StoreError::Corrupt("token does not decrypt on this machine".into()))?;
        let user: CachedUser = serde_json::from_str(&user_json)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        log::debug!("[Session] Loaded session for {} (synced at {})", user.name, synced_at);
        Ok(Some(Session { token, user, synced_at }))
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.connection()?.execute("DELETE FROM session", [])?;
        log::info!("[Session] Session cleared");
        Ok(())
    }

    /// Replace the cached profile and re-stamp the sync time
    pub fn update_user(&self, user: CachedUser) -> Result<Option<Session>, StoreError> {
        let Some(mut session) = self.try_load()? else {
            return Ok(None);
        };
        session.refresh_user(user);
        self.save(&session)?;
        Ok(Some(session))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
