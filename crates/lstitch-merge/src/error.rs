//! Error types for the stitch crate.

use lstitch_layer::LayerError;
use lstitch_types::SpecPath;

/// Errors that can occur while stitching.
///
/// A failure aborts the walk immediately. The strong layer keeps whatever
/// was merged before the failure; there is no rollback.
#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    /// The underlying layer rejected an access or mutation.
    #[error("layer error: {0}")]
    Layer(#[from] LayerError),

    /// A spec required by the operation is missing from one of the layers.
    #[error("no spec at {path} in layer '{layer}'")]
    SpecNotFound { layer: String, path: SpecPath },

    /// The stitch configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for stitch results.
pub type StitchResult<T> = Result<T, StitchError>;
