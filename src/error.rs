use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The input is not well-formed XML or has no readable root element.
    #[error("Malformed KML document: {reason}")]
    MalformedDocument { reason: String },

    /// No coordinate projection backend is available in this build/config.
    #[error("Coordinate projection is unavailable (build with the `utm` feature and enable it)")]
    Unavailable,

    /// A single coordinate could not be projected.
    #[error("Projection failed: {message}")]
    Projection { message: String },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedDocument {
            reason: reason.into(),
        }
    }
}
