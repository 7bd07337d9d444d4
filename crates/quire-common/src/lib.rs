//! Common utilities for the Quire layout engine.
//!
//! This crate provides shared infrastructure used by all Quire components:
//! - **Warning System** - deduplicated diagnostics routed through `log`

pub mod warning;
