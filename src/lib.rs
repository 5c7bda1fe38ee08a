//! CareerHQ Agent State API Library
//!
//! Keeps agent progress, the task registry and pending human approvals in
//! one store, feeds it from a pushed event stream, and serves it over HTTP.

pub mod agents;
pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
