use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::dto::EditStatusRequest;
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, ApiResponse};
use crate::service::SubmissionFilter;
use crate::types::ObjectId;

pub async fn list_submissions(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let submissions = state.service.list_submissions(SubmissionFilter::All)?;
    Ok::<_, ApiError>(Json(ApiResponse::success(submissions)))
}

pub async fn list_student_submissions(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let student_id = ObjectId::parse_str(&id)?;
    let submissions = state
        .service
        .list_submissions(SubmissionFilter::ByStudent(student_id))?;
    Ok::<_, ApiError>(Json(ApiResponse::success(submissions)))
}

pub async fn edit_submission_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<EditStatusRequest>,
) -> impl IntoResponse {
    let submission_id = ObjectId::parse_str(&req.task_id)?;
    let submission = state
        .service
        .edit_submission_status(&admin.admin_id, &submission_id, &req.status)
        .await?;

    Ok::<_, ApiError>((StatusCode::ACCEPTED, Json(ApiResponse::success(submission))))
}
