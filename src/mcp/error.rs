use std::path::PathBuf;

use rmcp::service::ServiceError;
use thiserror::Error;

/// Failures talking to a tool server.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("server script {0:?} must be a .py or .js file")]
    UnsupportedScript(PathBuf),

    #[error("failed to spawn tool server: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("tool server handshake failed: {0}")]
    Initialize(String),

    #[error("tool server closed the connection")]
    Closed,

    #[error("tool server request failed: {0}")]
    Service(#[source] ServiceError),
}

impl From<ServiceError> for McpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::TransportClosed => Self::Closed,
            other => Self::Service(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_transport_maps_to_closed() {
        assert!(matches!(
            McpError::from(ServiceError::TransportClosed),
            McpError::Closed
        ));
        assert!(matches!(
            McpError::from(ServiceError::UnexpectedResponse),
            McpError::Service(_)
        ));
    }
}
