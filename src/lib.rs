//! # filedash
//!
//! Client controller for a small file-sharing service: signup, login,
//! a role-gated dashboard (ops users upload, client users list and
//! download), and logout, all over the service's REST endpoints.
//!
//! The controller renders through an injected [`state::view::View`] and
//! keeps the session role in an injected [`state::session::SessionStore`],
//! so it runs the same behind a terminal host or a test recorder.

pub mod controller;
pub mod net;
pub mod state;

pub use controller::Controller;
