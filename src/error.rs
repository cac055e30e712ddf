use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use bcrypt::BcryptError;
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tokio::task::JoinError;
use tracing::{error, warn};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Error registering user";
pub const LOGIN_FAILED_MESSAGE: &str = "Error logging in";
const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

#[derive(Debug, ThisError)]
pub enum AitekenError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] BcryptError),

    #[error("Blocking task failed: {0}")]
    BlockingTask(#[from] JoinError),

    #[error("Configuration error: {0}")]
    Config(#[source] Box<figment::Error>),

    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Operation timed out after {0}s")]
    Timeout(u64),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Registration failed: {0}")]
    Registration(#[source] Box<AitekenError>),

    #[error("Login failed: {0}")]
    Login(#[source] Box<AitekenError>),
}

impl AitekenError {
    /// Tag an error raised while registering so the response carries the
    /// registration message.
    pub fn registration(err: AitekenError) -> Self {
        AitekenError::Registration(Box::new(err))
    }

    /// Tag an error raised while logging in. Authentication failures stay
    /// untagged so they keep mapping to 401.
    pub fn login(err: AitekenError) -> Self {
        match err {
            AitekenError::InvalidCredentials => err,
            other => AitekenError::Login(Box::new(other)),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AitekenError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<figment::Error> for AitekenError {
    fn from(e: figment::Error) -> Self {
        AitekenError::Config(Box::new(e))
    }
}

impl IntoResponse for AitekenError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            AitekenError::InvalidCredentials => {
                warn!("rejected login attempt");
                INVALID_CREDENTIALS_MESSAGE
            }
            AitekenError::Registration(source) => {
                log_source(source, REGISTRATION_FAILED_MESSAGE);
                REGISTRATION_FAILED_MESSAGE
            }
            AitekenError::Login(source) => {
                log_source(source, LOGIN_FAILED_MESSAGE);
                LOGIN_FAILED_MESSAGE
            }
            other => {
                error!(error = %other, "unhandled request error");
                INTERNAL_ERROR_MESSAGE
            }
        };
        (
            status,
            Json(ApiMessage {
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Client mistakes are logged at `warn`, server faults at `error`.
fn log_source(source: &AitekenError, message: &str) {
    match source {
        AitekenError::Body(_) => warn!(error = %source, "{}", message),
        _ => error!(error = %source, "{}", message),
    }
}

/// Body shared by every error response: only a generic message, no detail.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AitekenError) -> (StatusCode, String) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
    }

    #[tokio::test]
    async fn invalid_credentials_map_to_401() {
        let (status, body) = body_of(AitekenError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"message":"Invalid email or password"}"#);
    }

    #[tokio::test]
    async fn login_tag_keeps_invalid_credentials_untouched() {
        let err = AitekenError::login(AitekenError::InvalidCredentials);
        assert!(matches!(err, AitekenError::InvalidCredentials));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn storage_detail_is_not_leaked() {
        let err = AitekenError::registration(AitekenError::Database(SqlxError::Protocol(
            "no such table: Users".to_string(),
        )));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"message":"Error registering user"}"#);
        assert!(!body.contains("Users"));
    }

    #[tokio::test]
    async fn login_failures_use_login_message() {
        let err = AitekenError::login(AitekenError::Timeout(10));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"message":"Error logging in"}"#);
    }
}
