//! Network layer: wire types, configuration, and the REST transport.

pub mod api;
pub mod config;
pub mod types;
