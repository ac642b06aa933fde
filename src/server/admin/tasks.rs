use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::dto::{DeleteTaskParams, MessageResponse};
use crate::server::extract::{ApiJson, ApiQuery};
use crate::server::response::{ApiError, ApiResponse};
use crate::service::TaskInput;
use crate::types::ObjectId;

pub async fn create_task(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TaskInput>,
) -> impl IntoResponse {
    let task = state.service.create_task(&req, &admin.admin_id)?;
    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(task))))
}

pub async fn update_task(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TaskInput>,
) -> impl IntoResponse {
    let task = state.service.update_task(&req, &admin.admin_id)?;
    Ok::<_, ApiError>(Json(ApiResponse::success(task)))
}

pub async fn list_tasks(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let tasks = state.service.list_tasks()?;
    Ok::<_, ApiError>(Json(ApiResponse::success(tasks)))
}

pub async fn delete_task(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DeleteTaskParams>,
) -> impl IntoResponse {
    let id = ObjectId::parse_str(&params.task_id)?;
    state.service.delete_task(&id)?;

    Ok::<_, ApiError>((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(MessageResponse {
            message: "deleted task",
        })),
    ))
}
