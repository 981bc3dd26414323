//! # edgerules Application Library
//!
//! CLI, configuration loading and the HTTP query surface, exposed as a
//! library so integration tests can drive the router directly.

pub mod api;
pub mod cli;
pub mod config;
