//! # Application Layer
//!
//! The completion port and the per-session use case that drives it.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
