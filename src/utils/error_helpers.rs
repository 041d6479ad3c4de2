use crate::error::{DisplayError, FetchError};
use std::io;

/// Helper functions for standardizing error conversions across the codebase
/// Convert reqwest errors to FetchError with endpoint context
pub fn convert_request_error(
    error: reqwest::Error,
    endpoint: &str,
    timeout_secs: u64,
) -> FetchError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, timeout_secs);
    }

    match error.status() {
        Some(status) => FetchError::Http {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        },
        None => FetchError::Connection {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        },
    }
}

/// Convert timeout errors to FetchError with endpoint context
pub fn convert_timeout_error(endpoint: &str, timeout_secs: u64) -> FetchError {
    FetchError::Timeout {
        timeout_secs,
        endpoint: endpoint.to_string(),
    }
}

/// Convert JSON deserialization errors to FetchError with endpoint context
pub fn convert_json_error(error: reqwest::Error, endpoint: &str) -> FetchError {
    FetchError::InvalidResponse {
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

/// Convert IO errors to DisplayError for terminal operations
pub fn convert_io_to_display_error(error: io::Error, operation: &str) -> DisplayError {
    DisplayError::TerminalOutput(format!("{}: {}", operation, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_timeout_error() {
        let fetch_error = convert_timeout_error("/artworks?page=1&limit=12", 30);

        match fetch_error {
            FetchError::Timeout {
                endpoint,
                timeout_secs,
            } => {
                assert_eq!(endpoint, "/artworks?page=1&limit=12");
                assert_eq!(timeout_secs, 30);
            }
            _ => panic!("Expected Timeout error"),
        }
    }

    #[test]
    fn test_convert_io_to_display_error() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "test");
        let display_error = convert_io_to_display_error(io_error, "write");

        match display_error {
            DisplayError::TerminalOutput(msg) => assert!(msg.contains("write")),
            _ => panic!("Expected TerminalOutput error"),
        }
    }

    #[tokio::test]
    async fn test_convert_request_error_connection_refused() {
        // Port 9 (discard) is closed on test hosts; the request fails before any status
        let error = reqwest::Client::new()
            .get("http://127.0.0.1:9/artworks")
            .send()
            .await
            .unwrap_err();

        let fetch_error = convert_request_error(error, "/artworks", 30);
        assert!(matches!(fetch_error, FetchError::Connection { .. }));
        assert_eq!(fetch_error.endpoint(), "/artworks");
    }
}
