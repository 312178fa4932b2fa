//! Command handlers for the psminimize CLI.
//!
//! The main dispatch logic remains in main.rs.

pub mod minify;
