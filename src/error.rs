//! Error types for pixelx operations.

use crate::types::ChannelLayout;
use core::fmt;

/// Result type for pixelx operations.
///
/// Errors carry the location they were raised at via [`whereat::At`].
pub type Result<T> = core::result::Result<T, whereat::At<Error>>;

/// Error type for pixelx operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input parameters (buffer size, etc.)
    InvalidInput(String),
    /// Decoding failed
    DecodeFailed(DecodingError),
    /// Metadata probe failed
    ProbeFailed(DecodingError),
    /// Resize target has a zero dimension or a buffer size past `usize::MAX`
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Pixel coordinates outside the image
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// Typed view requested with the wrong pixel type
    LayoutMismatch {
        /// Layout the pixel type needs.
        expected: ChannelLayout,
        /// Layout the image has.
        actual: ChannelLayout,
    },
    /// The resampler rejected the operation
    ResizeFailed(String),
    /// Memory allocation failed
    OutOfMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Error::DecodeFailed(e) => write!(f, "decode failed: {}", e),
            Error::ProbeFailed(e) => write!(f, "probe failed: {}", e),
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {}x{}", width, height)
            }
            Error::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "pixel ({}, {}) out of bounds for {}x{} image",
                x, y, width, height
            ),
            Error::LayoutMismatch { expected, actual } => write!(
                f,
                "layout mismatch: expected {:?}, image is {:?}",
                expected, actual
            ),
            Error::ResizeFailed(msg) => write!(f, "resize failed: {}", msg),
            Error::OutOfMemory => write!(f, "out of memory"),
        }
    }
}

impl std::error::Error for Error {}

/// Coarse cause of a decode or probe failure.
///
/// The wrapped decoder only reports success or failure; this code keeps the
/// broad category and nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodingError {
    /// Format not recognized or not enabled
    Unsupported,
    /// Corrupt or truncated data
    Malformed,
    /// File could not be read
    Io,
    /// Decoder resource limits exceeded
    LimitsExceeded,
    /// Decoder reported a channel count outside 1..=4
    UnsupportedChannels,
}

impl From<&image::ImageError> for DecodingError {
    fn from(err: &image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(_) => DecodingError::Io,
            image::ImageError::Unsupported(_) => DecodingError::Unsupported,
            image::ImageError::Limits(_) => DecodingError::LimitsExceeded,
            _ => DecodingError::Malformed,
        }
    }
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DecodingError::Unsupported => "unsupported format",
            DecodingError::Malformed => "malformed data",
            DecodingError::Io => "i/o error",
            DecodingError::LimitsExceeded => "limits exceeded",
            DecodingError::UnsupportedChannels => "unsupported channel count",
        };
        write!(f, "{}", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_io() {
        let err = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(DecodingError::from(&err), DecodingError::Io);
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = Error::OutOfBounds {
            x: 5,
            y: 1,
            width: 4,
            height: 4,
        };
        assert_eq!(err.to_string(), "pixel (5, 1) out of bounds for 4x4 image");
    }
}
