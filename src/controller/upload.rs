//! Ops upload flow.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use super::Controller;
use crate::net::types::SelectedFile;
use crate::state::view::ListEntry;

/// Lowercase suffixes accepted for upload.
pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 3] = [".pptx", ".docx", ".xlsx"];

pub const INVALID_FILE_TYPE: &str = "Invalid file type. Only .pptx, .docx, and .xlsx files are allowed.";
pub const NO_FILE_SELECTED: &str = "No file selected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Refused locally; no request was made.
    Rejected,
    /// The server accepted the file.
    Uploaded,
    /// The server refused it or the request failed.
    Failed,
}

/// Case-insensitive suffix check against [`ALLOWED_UPLOAD_EXTENSIONS`].
#[must_use]
pub fn is_allowed_upload(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ALLOWED_UPLOAD_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

impl Controller {
    /// Validate and upload the selected file.
    ///
    /// The confirmation appended to the uploaded-files list is built locally
    /// from the selected name, not from the server reply.
    pub async fn upload(&self, file: Option<SelectedFile>) -> UploadOutcome {
        let Some(file) = file else {
            self.view.set_upload_message(NO_FILE_SELECTED);
            return UploadOutcome::Rejected;
        };

        if !is_allowed_upload(&file.name) {
            tracing::warn!(filename = %file.name, "upload rejected: file type not allowed");
            self.view.set_upload_message(INVALID_FILE_TYPE);
            self.view.clear_file_input();
            return UploadOutcome::Rejected;
        }

        let reply = match self.api.upload(&file).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, filename = %file.name, "upload request failed");
                self.view.set_upload_message(&format!("Error: {e}"));
                return UploadOutcome::Failed;
            }
        };

        self.view.set_upload_message(&reply.body.message);
        if !reply.ok() {
            tracing::warn!(status = reply.status, filename = %file.name, "upload refused by server");
            return UploadOutcome::Failed;
        }

        tracing::info!(filename = %file.name, bytes = file.bytes.len(), "upload complete");
        self.view.append_uploaded_file(ListEntry::text(format!("{} - Uploaded successfully!", file.name)));
        self.view.clear_file_input();
        UploadOutcome::Uploaded
    }
}
