use thiserror::Error;

/// Failures inside the block transformer.
///
/// These never reach callers of [`crate::to_markup`], which renders the
/// escaped fallback instead. [`crate::try_to_markup`] exposes them.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    #[error("Failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Unbalanced markup at fragment {index}: {reason}")]
    Unbalanced { index: usize, reason: String },
}
