//! Error types for the docmap library.

use thiserror::Error;

/// Result type alias for docmap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while ingesting and analyzing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No file part was present in the submission.
    #[error("No file provided")]
    NoFileProvided,

    /// The declared media type does not match the expected type.
    #[error("Wrong media type: expected {expected}, got {actual}")]
    WrongMediaType {
        /// Media type the endpoint accepts.
        expected: &'static str,
        /// Media type the upload declared.
        actual: String,
    },

    /// The filename does not carry the expected extension.
    #[error("Wrong file extension: {filename} does not end in .{expected}")]
    WrongExtension {
        /// Extension the endpoint accepts, without the leading dot.
        expected: &'static str,
        /// Filename the upload declared.
        filename: String,
    },

    /// The upload exceeds the size ceiling.
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge {
        /// Declared byte length of the upload.
        size: u64,
        /// Configured ceiling in bytes.
        limit: u64,
    },

    /// The content does not start with the expected magic bytes.
    #[error("Bad file signature: content is not a valid PDF")]
    BadSignature,

    /// Neither a file nor raw text was supplied.
    #[error("No content provided")]
    NoContentProvided,

    /// The extraction backend failed or returned malformed data.
    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    /// The generative-model call failed or returned unusable structure.
    #[error("Model call failed: {0}")]
    ModelCallFailed(String),

    /// Error while serializing an outward response.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::ExtractionFailed(err.to_string())
    }
}

impl Error {
    /// HTTP-equivalent status code for the outward response.
    ///
    /// Validation failures are client errors, extraction failures are
    /// unprocessable-entity errors, and model failures are upstream
    /// server errors.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NoFileProvided
            | Error::WrongMediaType { .. }
            | Error::WrongExtension { .. }
            | Error::TooLarge { .. }
            | Error::BadSignature
            | Error::NoContentProvided => 400,
            Error::ExtractionFailed(_) => 422,
            Error::ModelCallFailed(_) => 502,
            _ => 500,
        }
    }
}
