/// Error types for the ip2location library
use thiserror::Error;

/// Result type alias for ip2location operations
pub type Result<T> = std::result::Result<T, Ip2LocationError>;

/// Main error type for database open and query operations
#[derive(Debug, Error)]
pub enum Ip2LocationError {
    /// The file is too short to hold a header, or the header is unusable.
    /// Only produced while opening a database.
    #[error("Invalid database file: {0}")]
    InvalidFile(String),

    /// The query text is neither an IPv4 nor an IPv6 literal
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    /// A positional read fell outside the backing store
    #[error("I/O error: read of {len} bytes at offset {offset} is out of range")]
    Io {
        /// 1-based offset of the failed read
        offset: u64,
        /// Number of bytes requested
        len: usize,
    },

    /// The database path could not be opened or mapped
    #[error("Failed to open database: {0}")]
    Open(#[from] std::io::Error),
}

impl Ip2LocationError {
    /// True for errors caused by the query text rather than the database
    pub fn is_invalid_address(&self) -> bool {
        matches!(self, Ip2LocationError::InvalidAddress(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Ip2LocationError::InvalidAddress("999.999.999.999".to_string());
        assert_eq!(err.to_string(), "Invalid IP address: 999.999.999.999");
        assert!(err.is_invalid_address());

        let err = Ip2LocationError::Io { offset: 42, len: 4 };
        assert_eq!(
            err.to_string(),
            "I/O error: read of 4 bytes at offset 42 is out of range"
        );
        assert!(!err.is_invalid_address());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Ip2LocationError = io.into();
        assert!(matches!(err, Ip2LocationError::Open(_)));
    }
}
