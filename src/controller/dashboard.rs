//! Role gate and client file listing.
//!
//! The gate runs once per dashboard load. It reads the cached role and
//! reveals at most one panel:
//!
//! - no role (or an empty one): redirect to login, nothing rendered
//! - `ops`: greeting + upload panel
//! - `client`: greeting + files panel, then the listing is fetched
//! - anything else: nothing rendered, no redirect, reported as
//!   `GateOutcome::Unrecognized`

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use super::Controller;
use crate::net::api::download_path;
use crate::net::types::FileListing;
use crate::state::session::Role;
use crate::state::view::{ListContent, ListEntry, Panel, Route};

pub const LOADING_FILES: &str = "Loading files...";
pub const NO_FILES: &str = "No files available.";
pub const FILES_ERROR: &str = "Error loading files.";

/// What the gate did on this load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// No cached role; sent to the login page.
    RedirectedToLogin,
    /// A known role; its panel is visible.
    Rendered(Role),
    /// A cached role this client has no panel for.
    Unrecognized(String),
}

impl Controller {
    /// Run the role gate when `route` is the dashboard. Other routes have no
    /// load-time behavior.
    pub async fn bootstrap(&self, route: Route) -> Option<GateOutcome> {
        if route != Route::Dashboard {
            return None;
        }
        Some(self.check_role().await)
    }

    /// Gate the dashboard on the cached role.
    pub async fn check_role(&self) -> GateOutcome {
        let cached = match self.session.get() {
            Ok(cached) => cached,
            Err(e) => {
                tracing::error!(error = %e, "failed to read session role");
                None
            }
        };

        let Some(raw) = cached.filter(|raw| !raw.is_empty()) else {
            tracing::warn!("no user role found, redirecting to login");
            self.view.navigate(Route::Login);
            return GateOutcome::RedirectedToLogin;
        };

        match Role::parse(&raw) {
            Some(role @ Role::Ops) => {
                self.view.set_welcome(role.welcome());
                self.view.show_panel(Panel::Upload);
                GateOutcome::Rendered(role)
            }
            Some(role @ Role::Client) => {
                self.view.set_welcome(role.welcome());
                self.view.show_panel(Panel::Files);
                self.load_client_files().await;
                GateOutcome::Rendered(role)
            }
            None => {
                tracing::warn!(role = %raw, "unrecognized user role, no dashboard panel shown");
                GateOutcome::Unrecognized(raw)
            }
        }
    }

    /// Fill the client files list from `/list_files`.
    pub async fn load_client_files(&self) {
        self.view.set_client_files(ListContent::Text(LOADING_FILES.to_owned()));

        match self.api.list_files().await {
            Ok(listing) => {
                tracing::info!(count = listing.descriptors().len(), "client files loaded");
                self.view.set_client_files(render_listing(&listing));
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading files");
                self.view.set_client_files(ListContent::Entries(vec![ListEntry::error(FILES_ERROR)]));
            }
        }
    }
}

/// One download link per descriptor, or a single placeholder when empty.
#[must_use]
pub fn render_listing(listing: &FileListing) -> ListContent {
    let files = listing.descriptors();
    if files.is_empty() {
        return ListContent::Entries(vec![ListEntry::text(NO_FILES)]);
    }
    ListContent::Entries(
        files
            .iter()
            .map(|file| ListEntry::link(download_path(&file.download_link), file.filename.clone()))
            .collect(),
    )
}
