use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse};
use crate::service::{MentorInput, MentorResponse};

pub async fn create_mentor(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<MentorInput>,
) -> impl IntoResponse {
    let mentor = state.service.create_mentor(&req)?;
    Ok::<_, ApiError>((
        StatusCode::CREATED,
        Json(ApiResponse::success(MentorResponse::from(mentor))),
    ))
}

pub async fn update_mentor(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<MentorInput>,
) -> impl IntoResponse {
    let mentor = state.service.update_mentor(&req)?;
    Ok::<_, ApiError>((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(MentorResponse::from(mentor))),
    ))
}

pub async fn list_mentors(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mentors = state.service.list_mentors()?;
    Ok::<_, ApiError>(Json(ApiResponse::success(mentors)))
}
