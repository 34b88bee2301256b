//! Common utilities for Thicket.
//!
//! This crate provides shared infrastructure used by all Thicket components:
//! - **Warning System** - colored terminal output for questionable input

pub mod warning;
