//! Error taxonomy for docgraph.
//!
//! Input and syntax failures wrap the underlying error unmodified; malformed
//! relationship lines are the only convention error. Missing docstrings,
//! sections, or fields are absence, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocGraphError {
    /// Source file could not be read, or the rendering could not be written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file is not valid Rust.
    #[error("source file does not parse: {0}")]
    Syntax(#[from] syn::Error),

    /// A "See Also" field line without a `:` separator.
    #[error("malformed relationship line (missing ':'): {0:?}")]
    MalformedField(String),

    /// A rendered document failed to serialize.
    #[error("failed to serialize graph document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocGraphError>;
