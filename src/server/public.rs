use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::server::AppState;
use crate::server::dto::{LoginRequest, LoginResponse};
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse};
use crate::service::validation::require_fields;

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> impl IntoResponse {
    require_fields(&[("username", &req.username), ("password", &req.password)])?;

    let token = state.service.login(req.username.trim(), &req.password)?;
    Ok::<_, ApiError>(Json(ApiResponse::success(LoginResponse { token })))
}

/// Reference lists for sign-up forms. Served without authentication.
pub async fn reference_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let data = state.service.reference_data().await?;
    Ok::<_, ApiError>(Json(ApiResponse::success(data)))
}
