//! Internal error types for oculi-openai.

use thiserror::Error as ThisError;

/// Result type alias for oculi-openai operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for oculi-openai operations.
#[derive(Debug, ThisError)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<Error> for oculi_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    oculi_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    oculi_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    oculi_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if let Some(status) = e.status() {
                    status_error(status)
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    oculi_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => oculi_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}

/// Maps an HTTP status code onto a structured error kind.
fn status_error(status: reqwest::StatusCode) -> oculi_core::Error {
    use reqwest::StatusCode;

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => oculi_core::Error::authentication(),
        StatusCode::TOO_MANY_REQUESTS => oculi_core::Error::rate_limited(),
        status if status.is_server_error() => oculi_core::Error::service_unavailable(),
        _ => oculi_core::Error::external_error(),
    }
}

#[cfg(test)]
mod tests {
    use oculi_core::ErrorKind;
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED).kind(),
            ErrorKind::Authentication
        );
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS).kind(),
            ErrorKind::RateLimited
        );
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY).kind(),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST).kind(),
            ErrorKind::ExternalError
        );
    }

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: oculi_core::Error = Error::Serde(serde_error).into();
        assert_eq!(error.kind(), ErrorKind::Serialization);
    }
}
