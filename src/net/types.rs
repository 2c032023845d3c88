//! Wire types shared by the controller and the HTTP transport.
//!
//! Shapes mirror the JSON the file-sharing server emits. Fields the
//! controller never reads are still accepted so a richer server payload
//! does not break parsing.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while talking to the file-sharing server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect refused, reset, ...).
    #[error("{0}")]
    Transport(String),

    /// The response body was not the JSON shape we expected.
    #[error("{0}")]
    Parse(String),

    /// The server answered with a non-success status.
    #[error("Network response was not ok: {status_text}")]
    Status { status: u16, status_text: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A file picked for upload. `name` is what the extension check runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// A resolved HTTP response whose JSON body was read regardless of status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub status: u16,
    pub body: T,
}

impl<T> Reply<T> {
    /// True for any 2xx status.
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `{message}` body returned by `/signup` and `/upload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: String,
    /// Present on successful uploads only.
    #[serde(default)]
    pub download_link: Option<String>,
}

/// Successful `/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginBody {
    pub role: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of `/login`. Rejections carry no body on purpose: the controller
/// never shows server detail for a failed login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReply {
    Accepted(LoginBody),
    Rejected { status: u16 },
}

/// One entry of the `/list_files` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileDescriptor {
    pub filename: String,
    pub download_link: String,
    #[serde(default)]
    pub file_id: Option<i64>,
}

/// `/list_files` body. A missing `files` key is treated like an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub files: Option<Vec<FileDescriptor>>,
}

impl FileListing {
    /// Descriptors in server order, empty when the key was absent.
    #[must_use]
    pub fn descriptors(&self) -> &[FileDescriptor] {
        self.files.as_deref().unwrap_or_default()
    }
}
