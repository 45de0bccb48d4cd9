use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the FontPipe application
#[derive(Debug)]
pub enum Error {
    /// IO operations errors
    Io(io::Error),
    /// Font parsing or packaging errors
    Font(String),
    /// Conversion pair the transcoder cannot produce
    Unsupported(String),
    /// Unexpected directory shape during restructuring
    Structure(String),
    /// Configuration errors
    Config(String),
    /// Invalid file or directory path
    InvalidPath(PathBuf),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Font(msg) => write!(f, "Font error: {}", msg),
            Error::Unsupported(msg) => write!(f, "Unsupported conversion: {}", msg),
            Error::Structure(msg) => write!(f, "{}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidPath(path) => write!(f, "Invalid path: {}", path.display()),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Result type alias for FontPipe operations
pub type Result<T> = std::result::Result<T, Error>;
