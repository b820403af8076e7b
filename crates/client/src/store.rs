//! Durable session persistence.
//!
//! A session survives restarts through exactly two durable entries: the
//! opaque access token and the JSON-serialized profile. Both must be present
//! (and the profile must parse) for [`SessionStore::load`] to report a
//! session; anything less reads as "no session". Only the session manager
//! writes these entries.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::gateway::UserProfile;

/// Name of the token entry under the state directory.
const TOKEN_ENTRY: &str = "access_token";
/// Name of the profile entry under the state directory.
const PROFILE_ENTRY: &str = "profile.json";

/// Errors that can occur reading or writing the durable entries.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("session store I/O error: {0}")]
    Io(#[from] io::Error),

    /// Profile could not be serialized for writing.
    #[error("session store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A persisted session as read back from the store.
#[derive(Debug, Clone)]
pub struct PersistedSession {
    /// Opaque bearer token.
    pub token: String,
    /// Profile saved alongside the token.
    pub profile: UserProfile,
}

/// Durable key-value persistence for the session.
///
/// The contract mirrors the storage the storefront UI relies on: `load`
/// returns a session only if a prior `save` completed and no `clear`
/// happened since. No expiry is checked here - token validity is decided by
/// the gateway's responses alone.
pub trait SessionStore: Send + Sync {
    /// Persist both entries. Overwrites any previous session.
    ///
    /// # Errors
    ///
    /// Returns an error if either entry cannot be written.
    fn save(&self, token: &str, profile: &UserProfile) -> Result<(), StoreError>;

    /// Read the persisted session, if a complete one exists.
    ///
    /// A missing entry or an unparseable profile reads as `None`, not as an
    /// error: a half-written pair is indistinguishable from "logged out" and
    /// is treated as such.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures other than absence.
    fn load(&self) -> Result<Option<PersistedSession>, StoreError>;

    /// Remove both entries. Removing an already-empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails for a reason other than absence.
    fn clear(&self) -> Result<(), StoreError>;
}

// =============================================================================
// FileSessionStore
// =============================================================================

/// File-backed store: two files under a state directory.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first `save`.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_ENTRY)
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_ENTRY)
    }
}

/// Read a file, mapping absence to `None`.
fn read_entry(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io(e)),
    }
}

/// Remove a file, treating absence as success.
fn remove_entry(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::Io(e)),
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, token: &str, profile: &UserProfile) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.token_path(), token)?;
        std::fs::write(self.profile_path(), serde_json::to_vec(profile)?)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedSession>, StoreError> {
        let Some(token) = read_entry(&self.token_path())? else {
            return Ok(None);
        };
        let Some(raw_profile) = read_entry(&self.profile_path())? else {
            return Ok(None);
        };

        match serde_json::from_str::<UserProfile>(&raw_profile) {
            Ok(profile) => Ok(Some(PersistedSession { token, profile })),
            Err(e) => {
                // A corrupt profile invalidates the pair; the next login
                // overwrites it.
                tracing::warn!(error = %e, "persisted profile did not parse, treating as logged out");
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        remove_entry(&self.token_path())?;
        remove_entry(&self.profile_path())?;
        Ok(())
    }
}

// =============================================================================
// MemorySessionStore
// =============================================================================

/// In-memory store for tests and embedders that do not want persistence.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, token: &str, profile: &UserProfile) -> Result<(), StoreError> {
        let mut guard = self.session.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(PersistedSession {
            token: token.to_string(),
            profile: profile.clone(),
        });
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedSession>, StoreError> {
        let guard = self.session.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.session.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use sweetshop_core::{Email, UserId, UserRole};

    fn test_profile() -> UserProfile {
        UserProfile {
            id: UserId::new("u-1"),
            name: "Jane".to_string(),
            email: Email::parse("jane@example.com").unwrap(),
            role: UserRole::User,
            avatar: None,
            provider: Some("email".to_string()),
        }
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());

        assert!(store.load().unwrap().is_none());

        store.save("tok-123", &test_profile()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.profile.name, "Jane");
    }

    #[test]
    fn test_file_store_clear_removes_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());

        store.save("tok-123", &test_profile()).unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!dir.path().join(TOKEN_ENTRY).exists());
        assert!(!dir.path().join(PROFILE_ENTRY).exists());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_half_present_pair_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());

        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.path().join(TOKEN_ENTRY), "tok-orphan").unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_profile_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());

        store.save("tok-123", &test_profile()).unwrap();
        std::fs::write(dir.path().join(PROFILE_ENTRY), "{not json").unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store.save("tok-9", &test_profile()).unwrap();
        assert_eq!(store.load().unwrap().unwrap().token, "tok-9");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
