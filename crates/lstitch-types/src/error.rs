use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid spec path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid {kind} name: '{name}'")]
    InvalidName { kind: &'static str, name: String },
}

impl TypeError {
    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
