//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Mistral chat completions over HTTPS
//! - A scripted client for offline runs and tests

pub mod adapter;

pub use adapter::*;
