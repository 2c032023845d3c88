//! Signup, login, and logout flows.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use super::{Controller, ScheduledRedirect};
use crate::net::types::{LoginReply, LoginRequest, SignupRequest};
use crate::state::view::Route;

/// Shown for any non-2xx login, whatever the server said.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

impl Controller {
    /// Register an account.
    ///
    /// The server's message is shown for every resolved response. A 2xx also
    /// schedules a redirect to the login page after the configured delay;
    /// the returned handle may be cancelled, and dropping it does not.
    pub async fn signup(&self, form: &SignupRequest) -> Option<ScheduledRedirect> {
        let reply = match self.api.signup(form).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "signup request failed");
                self.view.set_message(&format!("Error: {e}"));
                return None;
            }
        };

        self.view.set_message(&reply.body.message);
        if !reply.ok() {
            tracing::warn!(status = reply.status, "signup rejected");
            return None;
        }

        tracing::info!(role = %form.role, delay = ?self.redirect_delay, "signup accepted");
        Some(ScheduledRedirect::spawn(Arc::clone(&self.view), Route::Login, self.redirect_delay))
    }

    /// Log in and cache the returned role.
    ///
    /// Returns the cached role string on success. On success the view
    /// navigates straight to the dashboard.
    pub async fn login(&self, form: &LoginRequest) -> Option<String> {
        let body = match self.api.login(form).await {
            Ok(LoginReply::Accepted(body)) => body,
            Ok(LoginReply::Rejected { status }) => {
                tracing::warn!(%status, "login rejected");
                self.view.set_message(INVALID_CREDENTIALS);
                return None;
            }
            Err(e) => {
                tracing::error!(error = %e, "login request failed");
                self.view.set_message(&e.to_string());
                return None;
            }
        };

        if let Err(e) = self.session.set(&body.role) {
            tracing::error!(error = %e, "failed to cache session role");
            self.view.set_message(&e.to_string());
            return None;
        }

        tracing::info!(role = %body.role, "login accepted");
        self.view.navigate(Route::Dashboard);
        Some(body.role)
    }

    /// Forget the cached role and return to the login page. No network call.
    pub fn logout(&self) {
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "failed to clear session role");
        }
        tracing::info!("logged out");
        self.view.navigate(Route::Login);
    }
}
