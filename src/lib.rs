//! psminimize Library
//!
//! Minimizes PowerShell scripts: comments stripped, variables shortened,
//! operator spacing compacted and statements joined onto one line.

pub mod cli;
pub mod config;
pub mod error;
pub mod minify;
pub mod summary;
pub mod theme;

pub use config::Config;
pub use error::{MinifyError, Result};
pub use minify::{exec, Pipeline, Stage};
pub use summary::Reduction;
