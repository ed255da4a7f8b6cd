use lstitch_types::{SpecPath, TypeError};

/// Errors from layer operations.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    /// No spec exists at the requested path.
    #[error("no spec at {0}")]
    SpecNotFound(SpecPath),

    /// A spec already exists at the path being created.
    #[error("spec already exists at {0}")]
    SpecExists(SpecPath),

    /// The parent of a spec being created does not exist.
    #[error("cannot create {path}: parent spec does not exist")]
    MissingParent { path: SpecPath },

    /// The spec type cannot live at the given path.
    #[error("cannot create {spec_type} spec at {path}")]
    InvalidChild { path: SpecPath, spec_type: String },

    /// Malformed path or name.
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    /// Document encoding or decoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while loading or saving a layer document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;
