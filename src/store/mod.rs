mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the persistence interface.
///
/// Every method is a single atomic statement; nothing spans tables in one
/// transaction.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Admin operations
    /// Inserts or updates the admin keyed by username. Returns the admin id.
    fn upsert_admin(&self, username: &str, password_hash: &str) -> Result<ObjectId>;
    fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>>;
    fn has_admin(&self) -> Result<bool>;

    // Task operations
    fn create_task(&self, task: &Task) -> Result<()>;
    /// Inserts the task, or replaces its content if the id exists. An existing
    /// row keeps its creator and created_at.
    fn upsert_task(&self, task: &Task) -> Result<()>;
    fn get_task(&self, id: &ObjectId) -> Result<Option<Task>>;
    fn list_tasks(&self) -> Result<Vec<Task>>;
    fn delete_task(&self, id: &ObjectId) -> Result<bool>;

    // Student operations
    fn create_student(&self, student: &Student) -> Result<()>;
    fn list_students(&self) -> Result<Vec<Student>>;

    // Submission operations
    fn create_submission(&self, submission: &Submission) -> Result<()>;
    fn get_submission(&self, id: &ObjectId) -> Result<Option<Submission>>;
    /// Sets the status of a submission and returns the updated row, or
    /// `Error::NotFound` if no submission has that id.
    fn update_submission_status(&self, id: &ObjectId, status: Status) -> Result<Submission>;
    /// Submissions joined with their student and task. Rows whose student or
    /// task is missing are dropped.
    fn list_submission_views(&self, student_id: Option<&ObjectId>) -> Result<Vec<SubmissionView>>;

    // Mentor operations
    /// Fails with `Error::AlreadyExists` if the name is taken.
    fn create_mentor(&self, mentor: &Mentor) -> Result<()>;
    fn upsert_mentor(&self, mentor: &Mentor) -> Result<()>;
    fn get_mentor(&self, id: &ObjectId) -> Result<Option<Mentor>>;
    fn list_mentors(&self) -> Result<Vec<Mentor>>;

    // Reference list operations
    fn upsert_reference(&self, kind: ReferenceKind, item: &ReferenceItem) -> Result<()>;
    fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>>;

    // Notification operations
    fn set_notification_token(&self, token: &NotificationToken) -> Result<()>;
    fn get_notification_token(&self, student_id: &ObjectId) -> Result<Option<NotificationToken>>;
    fn create_notification(&self, receipt: &NotificationReceipt) -> Result<()>;
    fn list_notifications(&self, student_id: &ObjectId) -> Result<Vec<NotificationReceipt>>;
}
