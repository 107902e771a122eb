//! Error types for the core engine.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised at the point of a violated contract.
///
/// All of these are local, synchronous failures; the operations are
/// deterministic, so none of them are worth retrying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Curve construction with an unsupported control point count.
    #[error("control point count must be between 4 and 8, got {0}")]
    InvalidPointCount(usize),

    /// Control point index outside `[0, point_count)`.
    #[error("control point index {index} out of range for a curve with {count} points")]
    IndexOutOfRange { index: usize, count: usize },

    /// A lookup table slice that is not exactly 256 entries.
    #[error("lookup table must have 256 entries, got {0}")]
    InvalidLutSize(usize),

    /// Pixel buffer with a zero dimension.
    #[error("pixel buffer dimensions must be positive, got {width}x{height}")]
    EmptyBuffer { width: u32, height: u32 },

    /// Pixel data whose length disagrees with the declared dimensions.
    #[error("expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    PixelDataMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
