//! Error types for lanevec-core.

use thiserror::Error;

/// Errors reported by register construction, small-vector construction and
/// small-vector operators.
///
/// Every fallible operation either returns a fully initialised value or one of
/// these variants; no partial results are produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Element kind outside the supported primitive set.
    #[error("Unsupported element type: {0}")]
    UnsupportedType(String),

    /// Binary operator given two non-broadcast operands of differing dimension.
    #[error("Dimension mismatch: left has {left} elements, right has {right}")]
    DimensionMismatch {
        /// Dimension of the left operand.
        left: usize,
        /// Dimension of the right operand.
        right: usize,
    },

    /// Index outside the source length, or a resulting small-vector length
    /// outside 1..=4 (then `index` is the length and `len` is 4).
    #[error("Value {index} out of range for length {len}")]
    OutOfRange {
        /// Requested index or element count.
        index: usize,
        /// Length of the source, or the largest vector dimension.
        len: usize,
    },

    /// Dispatch reached a dimension no representation can hold.
    #[error("Dimension {0} out of range for small vector dispatch")]
    DimensionOutOfRange(usize),

    /// Register assembler invoked with every segment empty.
    #[error("Register assembly requires at least one non-empty segment")]
    EmptyAssembly,

    /// Copy destination shorter than the source vector.
    #[error("Destination too small: need {required} elements, have {available}")]
    DestinationTooSmall {
        /// Elements the copy needs.
        required: usize,
        /// Elements available in the destination.
        available: usize,
    },

    /// Raw memory allocation failed or the layout was invalid.
    #[error("Allocation of {size} bytes aligned to {align} failed")]
    Allocation {
        /// Requested size in bytes.
        size: usize,
        /// Requested alignment in bytes.
        align: usize,
    },

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Capabilities were installed after detection had already run.
    #[error("Hardware capabilities already initialized")]
    CapabilitiesAlreadyInitialized,
}

/// Result type alias for lanevec operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
