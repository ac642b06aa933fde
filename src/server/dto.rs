use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Body of `PUT /admin/submission`. `task_id` carries the submission id.
#[derive(Debug, Default, Deserialize)]
pub struct EditStatusRequest {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub status: String,
}

/// Body of the reference list endpoints: `{"domain": ..}`, `{"college": ..}`
/// or `{"course": ..}`.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceRequest {
    #[serde(default, alias = "domain", alias = "college", alias = "course")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteTaskParams {
    #[serde(default)]
    pub task_id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
