//! Cached session role.
//!
//! ARCHITECTURE
//! ============
//! The role string is the only client-side session state. Every read and
//! write goes through a `SessionStore` owned by the controller: login sets
//! it, the dashboard gate reads it, logout clears it. Nothing here validates
//! the role against the server; that happens on each request server-side.
//!
//! The store holds the raw string exactly as the server returned it. Callers
//! interpret it with [`Role::parse`], so an unexpected value survives a
//! round trip and can be reported instead of silently dropped.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Storage key the role lives under.
pub const ROLE_KEY: &str = "userRole";

// =============================================================================
// ROLE
// =============================================================================

/// The two roles the dashboard knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Operations user: may upload files.
    Ops,
    /// Client user: may list and download files.
    Client,
}

impl Role {
    /// Exact, case-sensitive match on the cached string.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ops" => Some(Self::Ops),
            "client" => Some(Self::Client),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ops => "ops",
            Self::Client => "client",
        }
    }

    /// Greeting shown on the dashboard for this role.
    #[must_use]
    pub fn welcome(self) -> &'static str {
        match self {
            Self::Ops => "Welcome, Ops User!",
            Self::Client => "Welcome, Client User!",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Errors produced by a session store backend.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage is corrupt: {0}")]
    Corrupt(String),
}

/// Get/set/clear access to the single cached role slot.
pub trait SessionStore: Send + Sync {
    /// The cached role string, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self) -> Result<Option<String>, SessionError>;

    /// Replace the cached role.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, role: &str) -> Result<(), SessionError>;

    /// Remove the cached role. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

/// In-process store. Lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    role: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_role(role: &str) -> Self {
        Self { role: Mutex::new(Some(role.to_owned())) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        Ok(self.role.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn set(&self, role: &str) -> Result<(), SessionError> {
        *self.role.lock().unwrap_or_else(PoisonError::into_inner) = Some(role.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.role.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// File-backed key-value store, one JSON object per file.
///
/// Other keys in the file are preserved; the file is removed once the last
/// key is cleared.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt(e.to_string()))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if map.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            };
        }
        let raw = serde_json::to_string_pretty(map).map_err(|e| SessionError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_map()?.remove(ROLE_KEY))
    }

    fn set(&self, role: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        map.insert(ROLE_KEY.to_owned(), role.to_owned());
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        if map.remove(ROLE_KEY).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}
