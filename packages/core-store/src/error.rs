//! Error types for the store layer.

/// Errors raised by stores, archival, and cell construction.
///
/// Decode misses are never errors: a key that is absent or holds the wrong
/// physical type resolves to the cell's default instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A preference key was empty.
    #[error("preference key must not be empty")]
    EmptyKey,

    /// A value of this type cannot be held by a preference store.
    #[error("preference stores cannot hold values of type {type_name}")]
    UnsupportedType { type_name: String },

    /// Archiving or unarchiving an object failed.
    #[error("archive error: {message}")]
    Archive { message: String },

    /// The archive holds an object of a different class than requested.
    #[error("archived object is a {found}, expected {expected}")]
    ArchiveClassMismatch { expected: String, found: String },

    /// A preference domain name that cannot name a file.
    #[error("invalid preference domain: {name:?}")]
    InvalidDomain { name: String },

    /// I/O failure in a persistent store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON failure while archiving or persisting.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        Error::Archive {
            message: message.into(),
        }
    }
}
