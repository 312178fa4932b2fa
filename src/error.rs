//! Minification errors.

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, MinifyError>;

/// Errors that can abort a minification run.
#[derive(Debug, thiserror::Error)]
pub enum MinifyError {
    /// Two variables were handed the same transient alias. The rename cannot
    /// be done safely, so the whole run is abandoned.
    #[error("Generated alias {alias} for {name} is not unique")]
    AliasCollision { name: String, alias: String },

    #[error("Reserved variable '{0}' is not a variable name (expected $name)")]
    InvalidReserved(String),
}
