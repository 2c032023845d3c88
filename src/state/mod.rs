//! Client-side state: the cached session role and the view bindings.
//!
//! DESIGN
//! ======
//! Split by concern so the controller depends on two small seams: a store
//! for the one persisted value and a view for everything it draws.

pub mod session;
pub mod view;
