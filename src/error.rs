//! Custom error types for png512.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the png512 library.
///
/// Item errors (everything except [`Error::InvalidParameter`] and
/// [`Error::ThreadPool`]) never escape a batch run; they are folded into the
/// [`BatchReport`](crate::BatchReport) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The file extension is not one of the accepted image formats.
    #[error("unsupported format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to read the source file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to decode an image file.
    #[error("failed to decode image from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image dimensions are not supported.
    #[error("unsupported image dimensions {width}x{height}: {reason}")]
    UnsupportedDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Failed to encode the fitted image as PNG.
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to write the output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// The failure detail without the path, as shown next to an item label.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::UnsupportedFormat { .. } => "unsupported format".to_string(),
            Self::Read { source, .. } | Self::Write { source, .. } => source.to_string(),
            Self::Decode { source, .. } | Self::Encode { source, .. } => source.to_string(),
            Self::UnsupportedDimensions {
                width,
                height,
                reason,
            } => format!("unsupported image dimensions {width}x{height}: {reason}"),
            Self::InvalidParameter { name, reason } => format!("invalid parameter {name}: {reason}"),
            Self::ThreadPool(source) => source.to_string(),
        }
    }
}

/// Result type alias for png512 operations.
pub type Result<T> = std::result::Result<T, Error>;
