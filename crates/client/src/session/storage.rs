//! Durable session storage.
//!
//! One JSON document holds the serialized session, or is absent (Anonymous).
//! Documents are versioned; anything absent, malformed, or from an unknown
//! version hydrates to Anonymous rather than erroring. Nothing else is
//! persisted — cart and catalog are memory-only.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::Session;

/// Version written into new session documents.
pub const STORED_SESSION_VERSION: u32 = 1;

/// Errors that can occur when writing the session document.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem write failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The session could not be serialized.
    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// On-disk envelope around a [`Session`].
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    version: u32,
    user: Session,
}

/// Backend for the persisted session.
///
/// `load` never fails: undecodable data is treated as absent, so a corrupt
/// document degrades to Anonymous instead of crashing startup. `clear` also
/// never fails; removal errors are logged and swallowed so logout cannot be
/// blocked.
pub trait SessionStorage: Send {
    /// Read the stored session, if a decodable one exists.
    fn load(&self) -> Option<Session>;

    /// Persist the session, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document cannot be written.
    fn save(&mut self, session: &Session) -> Result<(), StorageError>;

    /// Remove the stored session. Infallible by contract.
    fn clear(&mut self);
}

/// File-backed session storage (the durable client storage analog).
///
/// The write is not atomic with the caller's in-memory update; a crash
/// between the two leaves them inconsistent until the next hydration.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Create storage over the given document path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Option<Session> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session document unreadable");
                return None;
            }
        };

        let stored: StoredSession = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session document malformed");
                return None;
            }
        };

        if stored.version != STORED_SESSION_VERSION {
            warn!(
                path = %self.path.display(),
                version = stored.version,
                "session document has unknown version"
            );
            return None;
        }

        Some(stored.user)
    }

    fn save(&mut self, session: &Session) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            version: STORED_SESSION_VERSION,
            user: session.clone(),
        };
        let contents = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&mut self) {
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %e, "failed to remove session document");
        }
    }
}

/// In-memory session storage, for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    stored: Option<Session>,
}

impl MemorySessionStorage {
    /// Create empty storage.
    #[must_use]
    pub const fn new() -> Self {
        Self { stored: None }
    }

    /// Create storage pre-seeded with a session, as if a previous run had
    /// signed in.
    #[must_use]
    pub const fn with_session(session: Session) -> Self {
        Self {
            stored: Some(session),
        }
    }

    /// The currently stored session, if any.
    #[must_use]
    pub const fn stored(&self) -> Option<&Session> {
        self.stored.as_ref()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<Session> {
        self.stored.clone()
    }

    fn save(&mut self, session: &Session) -> Result<(), StorageError> {
        self.stored = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) {
        self.stored = None;
    }
}
