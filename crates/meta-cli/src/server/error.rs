//! Listener errors with recovery suggestions.

use std::io;
use std::net::SocketAddr;

use meta_server::middleware::SurfaceKind;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Failure of one surface's listener.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address.
    #[error("{surface} surface failed to bind to {address}: {source}")]
    Bind {
        surface: SurfaceKind,
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The listener failed while serving.
    #[error("{surface} surface failed while serving: {source}")]
    Runtime {
        surface: SurfaceKind,
        #[source]
        source: io::Error,
    },
}

impl ServerError {
    fn io_error(&self) -> &io::Error {
        match self {
            Self::Bind { source, .. } | Self::Runtime { source, .. } => source,
        }
    }

    /// Provides a human-readable suggestion for resolving the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.io_error().kind() {
            io::ErrorKind::PermissionDenied => {
                Some("Try using a port above 1024 or run with appropriate privileges")
            }
            io::ErrorKind::AddrInUse => Some(
                "The port is already in use. Try a different port or stop the conflicting service",
            ),
            io::ErrorKind::AddrNotAvailable => {
                Some("The address is not available. Check network interface configuration")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_errors_carry_suggestions() {
        let error = ServerError::Bind {
            surface: SurfaceKind::Admin,
            address: SocketAddr::from(([127, 0, 0, 1], 5001)),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };

        assert!(error.to_string().starts_with("admin surface failed to bind"));
        assert!(error.suggestion().is_some());
    }
}
