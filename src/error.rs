// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Content(ContentError),
    Logging(String),
}

/// Problems with the gallery content handed to the controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// A gallery needs at least one item to navigate.
    EmptyGallery,

    /// No category is registered under this slug.
    UnknownCategory(String),

    /// The embedded catalog is missing or unreadable.
    Catalog(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::EmptyGallery => write!(f, "Gallery has no items"),
            ContentError::UnknownCategory(slug) => write!(f, "Unknown category: {}", slug),
            ContentError::Catalog(msg) => write!(f, "Invalid catalog: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Content(e) => write!(f, "Content Error: {}", e),
            Error::Logging(e) => write!(f, "Logging Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ContentError> for Error {
    fn from(err: ContentError) -> Self {
        Error::Content(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
