//! Error type definitions for mode-of-operation and field arithmetic

/// Primary error type for the gfmodes ecosystem
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid configuration: unsupported field width, polynomial/width
    /// mismatch, nonce/counter sizes that do not fill a block, oversized
    /// header, or a short data block handed to the authenticated mode
    #[error("{context}: invalid configuration: {message}")]
    Configuration {
        /// Where the bad configuration was detected
        context: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// An integer does not fit in the bit-width of a field element
    #[error("{context}: value needs {required} bits but the element is {width} bits wide")]
    Range {
        /// Where the conversion was attempted
        context: &'static str,
        /// Element bit-width
        width: usize,
        /// Number of significant bits in the offending value
        required: usize,
    },

    /// Two field elements of different widths (or moduli) were combined
    #[error("field element width mismatch: {left} bits vs {right} bits")]
    WidthMismatch {
        /// Width of the left operand
        left: usize,
        /// Width of the right operand
        right: usize,
    },

    /// The padding collaborator returned a length that is not one or two
    /// whole blocks
    #[error("{context}: padding scheme returned {actual} bytes, expected 1 or 2 blocks of {block_size}")]
    PaddingScheme {
        /// Mode that invoked the padding scheme
        context: &'static str,
        /// Block size of the cipher
        block_size: usize,
        /// Length the padding scheme actually produced
        actual: usize,
    },

    /// The padding collaborator rejected decrypted input
    #[error("{context}: invalid padding: {message}")]
    Padding {
        /// Padding scheme that failed
        context: &'static str,
        /// Why the padding was rejected
        message: String,
    },

    /// The underlying byte source failed, or a framed stream was malformed
    #[error("{context}: stream error: {message}")]
    Stream {
        /// Where the stream failed
        context: &'static str,
        /// Underlying failure
        message: String,
    },

    /// Invalid length error with context
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        /// What was being measured
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// A failed verification outcome that a caller chose to turn into an error
    #[error("{context}: authentication failed")]
    AuthenticationFailed {
        /// Mode whose tag did not verify
        context: &'static str,
    },
}

/// Result type for gfmodes operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create a Configuration error
    pub fn config(context: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create a Stream error
    pub fn stream(context: &'static str, message: impl Into<String>) -> Self {
        Self::Stream {
            context,
            message: message.into(),
        }
    }

    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::Configuration { message, .. } => Self::Configuration { context, message },
            Self::Range {
                width, required, ..
            } => Self::Range {
                context,
                width,
                required,
            },
            Self::WidthMismatch { left, right } => Self::WidthMismatch { left, right },
            Self::PaddingScheme {
                block_size, actual, ..
            } => Self::PaddingScheme {
                context,
                block_size,
                actual,
            },
            Self::Padding { message, .. } => Self::Padding { context, message },
            Self::Stream { message, .. } => Self::Stream { context, message },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::AuthenticationFailed { .. } => Self::AuthenticationFailed { context },
        }
    }

    /// True for the error classes that indicate a programming error in the
    /// caller or a collaborator rather than bad runtime input
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::PaddingScheme { .. } | Self::WidthMismatch { .. }
        )
    }
}
