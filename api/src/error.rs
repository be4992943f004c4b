//! The client's error taxonomy.

use serde::Deserialize;
use thiserror::Error;

/// Everything that can go wrong talking to the REST API.
#[derive(Error, Debug, strum::EnumIs)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not what the endpoint promises.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller is not logged in, or the token was rejected.
    #[error("login required: {message}")]
    Unauthorized { message: String },

    /// Personalized recommendations need onboarding first. Not a failure.
    #[error("{message}")]
    NeedsOnboarding { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// Any other non-success status.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Refused before sending anything.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// The shapes error bodies come in: `{"error": ..}` from the app,
/// `{"message": ..}` for onboarding, `{"msg": ..}` from the JWT layer.
#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

impl ApiError {
    pub const DEFAULT_ONBOARDING_MESSAGE: &'static str =
        "Pick a few places you like to get personalized recommendations.";

    /// Classifies a non-success response by status and body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let server_message = parsed
            .error
            .or(parsed.message)
            .or(parsed.msg)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        match status {
            // flask-jwt answers 422 for malformed or expired tokens
            401 | 403 | 422 => Self::Unauthorized {
                message: server_message.unwrap_or_else(|| "please log in".to_string()),
            },
            428 => Self::NeedsOnboarding {
                message: server_message
                    .unwrap_or_else(|| Self::DEFAULT_ONBOARDING_MESSAGE.to_string()),
            },
            404 => Self::NotFound {
                message: server_message.unwrap_or_else(|| "no such resource".to_string()),
            },
            _ => Self::Rejected {
                status,
                message: server_message.unwrap_or_else(|| format!("HTTP {status}")),
            },
        }
    }

    /// The message the server attached, if the error carries one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::NeedsOnboarding { message }
            | Self::NotFound { message }
            | Self::Rejected { message, .. } => Some(message),
            Self::InvalidInput(message) => Some(message),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_failure_means_onboarding() {
        let body = r#"{"need_onboarding": true, "message": "No preferences yet."}"#;
        let err = ApiError::from_response(428, body);
        assert!(err.is_needs_onboarding());
        assert_eq!(err.server_message(), Some("No preferences yet."));
    }

    #[test]
    fn onboarding_without_message_gets_a_default() {
        let err = ApiError::from_response(428, "");
        assert_eq!(err.server_message(), Some(ApiError::DEFAULT_ONBOARDING_MESSAGE));
    }

    #[test]
    fn auth_failures_are_unauthorized() {
        assert!(ApiError::from_response(401, r#"{"error": "bad password"}"#).is_unauthorized());
        assert!(ApiError::from_response(403, "").is_unauthorized());
        let jwt = ApiError::from_response(422, r#"{"msg": "Not enough segments"}"#);
        assert!(jwt.is_unauthorized());
        assert_eq!(jwt.server_message(), Some("Not enough segments"));
    }

    #[test]
    fn other_statuses_keep_server_text() {
        let err = ApiError::from_response(400, r#"{"error": "Rating must be 1..5"}"#);
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Rating must be 1..5");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(ApiError::from_response(404, "<html>").is_not_found());
        assert_eq!(
            ApiError::from_response(502, "<html>").server_message(),
            Some("HTTP 502")
        );
    }
}
