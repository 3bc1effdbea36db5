//! Common utilities for the Tessera sanitizer.
//!
//! This crate provides shared infrastructure used by the sanitizer crates:
//! - **Warning System** - deduplicated, colored terminal output for setup-time problems

pub mod warning;
