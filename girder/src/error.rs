//! Grid configuration error types

/// Errors raised while assembling a grid's configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Two columns in the same model share a key.
    #[error("duplicate column key: {key}")]
    DuplicateColumn {
        /// The offending key.
        key: String,
    },
}
