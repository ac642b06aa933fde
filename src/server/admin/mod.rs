mod mentors;
mod reference;
mod submissions;
mod tasks;
mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        // Task routes
        .route(
            "/task",
            get(tasks::list_tasks)
                .post(tasks::create_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        // Student routes
        .route("/users", get(users::list_users))
        // Submission routes
        .route(
            "/submission",
            get(submissions::list_submissions).put(submissions::edit_submission_status),
        )
        .route(
            "/user/submission/{id}",
            get(submissions::list_student_submissions),
        )
        // Mentor routes
        .route(
            "/mentor",
            get(mentors::list_mentors)
                .post(mentors::create_mentor)
                .put(mentors::update_mentor),
        )
        // Reference list routes
        .route("/domain", post(reference::create_domain))
        .route("/college", post(reference::create_college))
        .route("/course", post(reference::create_course))
}
