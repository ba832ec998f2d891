//! Common utilities for the Thicket markup parser.
//!
//! This crate provides shared infrastructure used by all Thicket components:
//! - **Warning System** - colored terminal output for non-fatal parse issues

pub mod warning;
