use crate::header::GZIP_START;
use std::error::Error;
use std::fmt;
use std::io;

/// Errors that abort the extraction of a single demo file.
///
/// Every variant is local to one file. The batch operation logs the error,
/// skips the file and keeps going; only failing to enumerate the demo
/// directory itself is fatal.
#[derive(Debug)]
pub enum ParseError {
    /// The demo file could not be opened or read
    Io(io::Error),

    /// The file ends before the compressed body even starts
    TooShort(usize),

    /// The compressed body is not a decodable gzip stream
    Gzip(io::Error),

    /// A read was attempted past the end of the available data
    InsufficientData(usize, usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "unable to read demo file: {}", e),
            ParseError::TooShort(len) => write!(
                f,
                "file is {} bytes, but the compressed body starts at {:#x}",
                len, GZIP_START
            ),
            ParseError::Gzip(e) => write!(f, "unable to decode gzip body: {}", e),
            ParseError::InsufficientData(needed, available) => write!(
                f,
                "insufficient data. Expected {} bytes, but only {} left",
                needed, available
            ),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Io(e) | ParseError::Gzip(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(error: io::Error) -> Self {
        ParseError::Io(error)
    }
}

/// Errors raised while persisting a resolved demo to its cache artifact.
///
/// A failed store only means this run's result is not persisted; the next
/// run parses the file again.
#[derive(Debug)]
pub enum CacheError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(e) => write!(f, "unable to write cache artifact: {}", e),
            CacheError::Serialize(e) => write!(f, "unable to encode cache artifact: {}", e),
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CacheError::Io(e) => Some(e),
            CacheError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(error: io::Error) -> Self {
        CacheError::Io(error)
    }
}
