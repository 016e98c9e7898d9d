//! Command implementations.
//!
//! - [`smoke`] - load every page in Chrome and report

pub mod smoke;

pub use smoke::execute as smoke_execute;
