//! View bindings the controller renders into.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller never touches a rendering surface directly. Everything it
//! shows (messages, greetings, panels, list entries, navigation) goes through
//! a `View` handed to it at construction. The CLI host prints; tests record.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

pub const LIST_ITEM_CLASS: &str = "list-group-item";
pub const ERROR_ITEM_CLASS: &str = "list-group-item text-danger";

// =============================================================================
// ROUTES & PANELS
// =============================================================================

/// Pages the controller navigates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Signup,
    Login,
    Dashboard,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Index => "/",
            Self::Signup => "/signup",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Exact path match; anything else is not a page this client renders.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Index),
            "/signup" => Some(Self::Signup),
            "/login" => Some(Self::Login),
            "/dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }
}

/// Role-gated dashboard sections. Hidden until the gate reveals one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Upload form, ops users only.
    Upload,
    /// File listing, client users only.
    Files,
}

// =============================================================================
// LIST ENTRIES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    Text(String),
    Link { href: String, text: String, new_tab: bool },
}

/// One `<li>` in a file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub class: &'static str,
    pub content: EntryContent,
}

impl ListEntry {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { class: LIST_ITEM_CLASS, content: EntryContent::Text(text.into()) }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self { class: ERROR_ITEM_CLASS, content: EntryContent::Text(text.into()) }
    }

    /// Link that opens in a new tab.
    #[must_use]
    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            class: LIST_ITEM_CLASS,
            content: EntryContent::Link { href: href.into(), text: text.into(), new_tab: true },
        }
    }

    /// Visible text of the entry.
    #[must_use]
    pub fn label(&self) -> &str {
        match &self.content {
            EntryContent::Text(text) | EntryContent::Link { text, .. } => text.as_str(),
        }
    }

    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match &self.content {
            EntryContent::Text(_) => None,
            EntryContent::Link { href, .. } => Some(href.as_str()),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.class == ERROR_ITEM_CLASS
    }
}

/// Whole-list replacement for the client files list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    /// Bare text with no entries, used for the loading placeholder.
    Text(String),
    Entries(Vec<ListEntry>),
}

impl ListContent {
    #[must_use]
    pub fn entries(&self) -> &[ListEntry] {
        match self {
            Self::Text(_) => &[],
            Self::Entries(entries) => entries.as_slice(),
        }
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// Rendering surface for the controller. Methods are infallible: a view
/// that cannot draw something drops it.
pub trait View: Send + Sync {
    /// Status line on the signup and login pages.
    fn set_message(&self, text: &str);

    /// Status line under the upload form.
    fn set_upload_message(&self, text: &str);

    fn set_welcome(&self, text: &str);

    fn show_panel(&self, panel: Panel);

    /// Replace the client files list.
    fn set_client_files(&self, content: ListContent);

    /// Append to the ops user's uploaded-files list.
    fn append_uploaded_file(&self, entry: ListEntry);

    fn clear_file_input(&self);

    fn navigate(&self, route: Route);
}
