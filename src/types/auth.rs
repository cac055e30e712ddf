use crate::db::models::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /register`.
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /login`.
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Keep plaintext passwords out of `{:?}` output and therefore out of logs.
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Success body for both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    pub message: String,
    pub user_id: UserId,
}

impl UserIdResponse {
    pub fn registered(user_id: UserId) -> Self {
        Self {
            message: "User registered successfully".to_string(),
            user_id,
        }
    }

    pub fn logged_in(user_id: UserId) -> Self {
        Self {
            message: "Login successful".to_string(),
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_camel_case_user_id() {
        let json = serde_json::to_string(&UserIdResponse::registered(7)).expect("serialize");
        assert_eq!(json, r#"{"message":"User registered successfully","userId":7}"#);
    }

    #[test]
    fn debug_output_redacts_password() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.c","password":"hunter2"}"#).expect("parse");
        let printed = format!("{req:?}");
        assert!(printed.contains("a@b.c"));
        assert!(!printed.contains("hunter2"));
    }
}
