//! Dashboard client controller.
//!
//! ARCHITECTURE
//! ============
//! `Controller` binds the user flows (signup, login, upload, logout) and
//! the role-gated dashboard to the REST API. It owns three seams, all
//! injected at construction:
//!
//! - `DashboardApi` for the network,
//! - `SessionStore` for the cached role,
//! - `View` for everything the user sees, navigation included.
//!
//! Each flow is one request/response round trip. Failures are reported
//! through the view and never retried; nothing a flow does can break the
//! controller for the next one.
//!
//! Flows live in submodules by page: `auth` (signup, login, logout),
//! `dashboard` (role gate and file listing), `upload`.

mod auth;
mod dashboard;
mod redirect;
mod upload;

#[cfg(test)]
mod test_helpers;

use std::sync::Arc;
use std::time::Duration;

use crate::net::api::DashboardApi;
use crate::net::config::DEFAULT_REDIRECT_DELAY_MS;
use crate::net::types::ApiError;
use crate::state::session::SessionStore;
use crate::state::view::View;

pub use dashboard::{FILES_ERROR, GateOutcome, LOADING_FILES, NO_FILES, render_listing};
pub use redirect::ScheduledRedirect;
pub use upload::{ALLOWED_UPLOAD_EXTENSIONS, INVALID_FILE_TYPE, NO_FILE_SELECTED, UploadOutcome, is_allowed_upload};

pub use auth::INVALID_CREDENTIALS;

#[derive(Clone)]
pub struct Controller {
    api: Arc<dyn DashboardApi>,
    session: Arc<dyn SessionStore>,
    view: Arc<dyn View>,
    redirect_delay: Duration,
}

impl Controller {
    #[must_use]
    pub fn new(api: Arc<dyn DashboardApi>, session: Arc<dyn SessionStore>, view: Arc<dyn View>) -> Self {
        Self { api, session, view, redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS) }
    }

    /// Override the post-signup redirect delay.
    #[must_use]
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        self.redirect_delay
    }

    /// Fetch a listed file's bytes by its download token.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or `ApiError::Status` when the token is
    /// rejected or the file is gone.
    pub async fn download(&self, download_link: &str) -> Result<Vec<u8>, ApiError> {
        match self.api.download(download_link).await {
            Ok(bytes) => {
                tracing::info!(bytes = bytes.len(), "download complete");
                Ok(bytes)
            }
            Err(e) => {
                tracing::error!(error = %e, "download failed");
                Err(e)
            }
        }
    }
}
