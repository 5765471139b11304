use thiserror::Error;

use crate::api::ApiError;

/// Shown when the backend gave no usable message.
pub const GENERIC_AUTH_FAILURE: &str = "Authentication failed. Please try again.";

/// Failure of a session operation, carrying a message fit for the login form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Name is required")]
    MissingName,

    #[error("No stored credential")]
    NoStoredCredential,

    /// The backend refused the request; the message is the backend's own.
    #[error("{0}")]
    Rejected(String),

    /// Network unreachable or timed out. The detail only goes to the log.
    #[error("Authentication failed. Please try again.")]
    Transport(String),

    /// Response lacked the token or the user fields a session needs.
    #[error("Invalid authentication response: {0}")]
    ProtocolViolation(String),

    /// A request came back 401 while signed in.
    #[error("Your session has expired. Please sign in again.")]
    Expired,

    #[error("Failed to save credential: {0}")]
    Storage(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NetworkError(e) => AuthError::Transport(e.to_string()),
            ApiError::InvalidResponse(msg) => AuthError::ProtocolViolation(msg),
            other => AuthError::Rejected(
                other
                    .backend_message()
                    .unwrap_or(GENERIC_AUTH_FAILURE)
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_backend_message_is_surfaced() {
        let api = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"Wrong password"}"#);
        let err = AuthError::from(api);
        assert_eq!(err, AuthError::Rejected("Wrong password".to_string()));
        assert_eq!(err.to_string(), "Wrong password");
    }

    #[test]
    fn test_client_rejections_carry_backend_message() {
        let err = AuthError::from(ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid email or password"}"#,
        ));
        assert_eq!(err, AuthError::Rejected("Invalid email or password".to_string()));

        let err = AuthError::from(ApiError::from_status(
            StatusCode::CONFLICT,
            r#"{"message":"Email already registered"}"#,
        ));
        assert_eq!(err, AuthError::Rejected("Email already registered".to_string()));
        assert_eq!(err.to_string(), "Email already registered");

        let err = AuthError::from(ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, ""));
        assert_eq!(err.to_string(), GENERIC_AUTH_FAILURE);
    }

    #[test]
    fn test_generic_fallback() {
        let err = AuthError::from(ApiError::RateLimited);
        assert_eq!(err.to_string(), GENERIC_AUTH_FAILURE);

        let err = AuthError::from(ApiError::from_status(StatusCode::UNAUTHORIZED, ""));
        assert_eq!(err.to_string(), GENERIC_AUTH_FAILURE);
    }

    #[test]
    fn test_transport_hides_detail() {
        let err = AuthError::Transport("dns error: no such host".to_string());
        assert_eq!(err.to_string(), GENERIC_AUTH_FAILURE);
    }

    #[test]
    fn test_invalid_response_is_protocol_violation() {
        let err = AuthError::from(ApiError::InvalidResponse("bad json".to_string()));
        assert!(matches!(err, AuthError::ProtocolViolation(_)));
    }
}
