use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why the output directory cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTargetCause {
    Missing,
    NotADirectory,
    NotWritable,
}

impl fmt::Display for OutputTargetCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            OutputTargetCause::Missing => "directory does not exist",
            OutputTargetCause::NotADirectory => "path is not a directory",
            OutputTargetCause::NotWritable => "directory is not writable",
        };
        f.write_str(message)
    }
}

/// A single failed HTTP GET, either for the page itself or for one of its resources.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server responded with HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("host not found")]
    HostNotFound,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Maps a `reqwest` failure onto the transport sub-causes users care about.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout;
        }
        if err.is_redirect() {
            return FetchError::TooManyRedirects;
        }
        if let Some(status) = err.status() {
            return FetchError::HttpStatus {
                status: status.as_u16(),
            };
        }

        let mut source: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(err);
        while let Some(cause) = source {
            if let Some(io_err) = cause.downcast_ref::<io::Error>() {
                match io_err.kind() {
                    io::ErrorKind::ConnectionRefused => return FetchError::ConnectionRefused,
                    io::ErrorKind::TimedOut => return FetchError::Timeout,
                    _ => {}
                }
            }
            let message = cause.to_string();
            if message.contains("dns error") || message.contains("failed to lookup address") {
                return FetchError::HostNotFound;
            }
            source = cause.source();
        }

        FetchError::Transport(err.to_string())
    }
}

/// Discriminant of [`PageLoaderError`], used for exit codes and observer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InvalidOutputTarget,
    DocumentFetchFailed,
    ResourceFetchFailed,
    PersistFailed,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidInput => 2,
            ErrorKind::InvalidOutputTarget => 3,
            ErrorKind::DocumentFetchFailed => 4,
            ErrorKind::ResourceFetchFailed => 5,
            ErrorKind::PersistFailed => 6,
        }
    }
}

#[derive(Debug, Error)]
pub enum PageLoaderError {
    #[error("invalid page URL '{url}': {reason}")]
    InvalidInput { url: String, reason: String },

    #[error("cannot write to output directory {}: {cause}", path.display())]
    InvalidOutputTarget {
        path: PathBuf,
        cause: OutputTargetCause,
    },

    #[error("failed to download page {url}: {source}")]
    DocumentFetchFailed {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to download resource {url}: {source}")]
    ResourceFetchFailed {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to write {}: {source}", path.display())]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PageLoaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PageLoaderError::InvalidInput { .. } => ErrorKind::InvalidInput,
            PageLoaderError::InvalidOutputTarget { .. } => ErrorKind::InvalidOutputTarget,
            PageLoaderError::DocumentFetchFailed { .. } => ErrorKind::DocumentFetchFailed,
            PageLoaderError::ResourceFetchFailed { .. } => ErrorKind::ResourceFetchFailed,
            PageLoaderError::PersistFailed { .. } => ErrorKind::PersistFailed,
        }
    }
}

pub type Result<T, E = PageLoaderError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = PageLoaderError::InvalidOutputTarget {
            path: PathBuf::from("/nope"),
            cause: OutputTargetCause::Missing,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidOutputTarget);

        let err = PageLoaderError::DocumentFetchFailed {
            url: "https://example.com".to_string(),
            source: FetchError::HttpStatus { status: 404 },
        };
        assert_eq!(err.kind(), ErrorKind::DocumentFetchFailed);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let kinds = [
            ErrorKind::InvalidInput,
            ErrorKind::InvalidOutputTarget,
            ErrorKind::DocumentFetchFailed,
            ErrorKind::ResourceFetchFailed,
            ErrorKind::PersistFailed,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_messages_name_the_cause() {
        let err = PageLoaderError::InvalidOutputTarget {
            path: PathBuf::from("/tmp/file.txt"),
            cause: OutputTargetCause::NotADirectory,
        };
        assert_eq!(
            err.to_string(),
            "cannot write to output directory /tmp/file.txt: path is not a directory"
        );

        let err = PageLoaderError::DocumentFetchFailed {
            url: "https://example.com/missing".to_string(),
            source: FetchError::HttpStatus { status: 404 },
        };
        assert_eq!(
            err.to_string(),
            "failed to download page https://example.com/missing: server responded with HTTP 404"
        );
    }
}
