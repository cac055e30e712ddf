use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::router::AppState;
use crate::types::auth::{LoginRequest, RegisterRequest, UserIdResponse};
use crate::AitekenError;

/// POST /register -> 201 with the new user id. An unreadable body fails like
/// any other registration error.
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserIdResponse>), AitekenError> {
    let Json(req) = payload.map_err(|e| AitekenError::registration(e.into()))?;
    let user_id = state
        .credentials
        .register(req)
        .await
        .map_err(AitekenError::registration)?;
    Ok((StatusCode::CREATED, Json(UserIdResponse::registered(user_id))))
}

/// POST /login -> 200 with the user id. No session or token is issued.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<UserIdResponse>, AitekenError> {
    let Json(req) = payload.map_err(|e| AitekenError::login(e.into()))?;
    let user_id = state
        .credentials
        .login(req)
        .await
        .map_err(AitekenError::login)?;
    Ok(Json(UserIdResponse::logged_in(user_id)))
}
