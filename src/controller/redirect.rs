//! Delayed navigation.
//!
//! Dropping a `ScheduledRedirect` detaches it: the navigation still fires.
//! Only [`ScheduledRedirect::cancel`] stops it.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::state::view::{Route, View};

#[derive(Debug)]
pub struct ScheduledRedirect {
    route: Route,
    handle: JoinHandle<()>,
}

impl ScheduledRedirect {
    pub(crate) fn spawn(view: Arc<dyn View>, route: Route, delay: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(route = route.path(), "scheduled redirect fired");
            view.navigate(route);
        });
        Self { route, handle }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the redirect if it has not fired yet.
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Wait for the redirect to fire.
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "scheduled redirect did not complete");
        }
    }
}
