use crate::surface::PixelFormat;

/// Convenience result type used across the crate.
pub type MaskResult<T> = Result<T, MaskError>;

/// Errors raised by mask operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// A position argument lies outside the mask.
    #[error("position ({x}, {y}) is outside a {width}x{height} mask")]
    OutOfBounds {
        /// Requested x coordinate.
        x: i32,
        /// Requested y coordinate.
        y: i32,
        /// Mask width.
        width: usize,
        /// Mask height.
        height: usize,
    },

    /// An argument has a value the operation cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A companion pixel source does not share the target's pixel format.
    #[error("pixel format mismatch: target is {expected:?}, source is {found:?}")]
    FormatMismatch {
        /// Format of the render target.
        expected: PixelFormat,
        /// Format of the offending companion source.
        found: PixelFormat,
    },
}

impl MaskError {
    /// Build a [`MaskError::OutOfBounds`] value.
    pub fn out_of_bounds(x: i32, y: i32, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a [`MaskError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = MaskError::out_of_bounds(-1, 4, 3, 3);
        assert_eq!(err.to_string(), "position (-1, 4) is outside a 3x3 mask");
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = MaskError::invalid_argument("negative width -2");
        assert_eq!(err.to_string(), "invalid argument: negative width -2");
    }
}
