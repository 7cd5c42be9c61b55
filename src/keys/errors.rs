//! Key construction errors.

use thiserror::Error;

use crate::observability::Severity;

/// Errors raised while building index keys.
#[derive(Debug, Error)]
pub enum KeyError {
    /// An append would run past the builder's capacity.
    #[error("key buffer overflow: {needed} bytes needed, {remaining} remaining")]
    BufferOverflow { needed: usize, remaining: usize },

    /// A precomputed prefix is larger than the target builder.
    #[error("precomputed prefix of {needed} bytes exceeds capacity {capacity}")]
    PrefixTooLarge { needed: usize, capacity: usize },

    /// An append was attempted after the key was finished.
    #[error("key buffer is sealed; reset before appending")]
    SealedBuffer,
}

impl KeyError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            KeyError::BufferOverflow { .. } => "KEY_BUFFER_OVERFLOW",
            KeyError::PrefixTooLarge { .. } => "KEY_PREFIX_TOO_LARGE",
            KeyError::SealedBuffer => "KEY_SEALED_BUFFER",
        }
    }

    /// All key errors abort the current range build.
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}
