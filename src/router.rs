use axum::{Router, routing::post};

use crate::handlers::auth::{login_handler, register_handler};
use crate::service::credentials::CredentialService;

/// Shared handler state. Holds the pool-backed service; no process globals.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialService,
}

impl AppState {
    pub fn new(credentials: CredentialService) -> Self {
        Self { credentials }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .with_state(state)
}
