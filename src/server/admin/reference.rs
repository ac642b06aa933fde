use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::dto::ReferenceRequest;
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse};
use crate::types::ReferenceKind;

fn create_reference(
    state: &AppState,
    kind: ReferenceKind,
    req: &ReferenceRequest,
) -> Result<Response, ApiError> {
    let item = state.service.create_reference(kind, &req.name)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))).into_response())
}

pub async fn create_domain(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ReferenceRequest>,
) -> Result<Response, ApiError> {
    create_reference(&state, ReferenceKind::Domain, &req)
}

pub async fn create_college(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ReferenceRequest>,
) -> Result<Response, ApiError> {
    create_reference(&state, ReferenceKind::College, &req)
}

pub async fn create_course(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ReferenceRequest>,
) -> Result<Response, ApiError> {
    create_reference(&state, ReferenceKind::Course, &req)
}
