use chrono::Utc;

use super::AdminService;
use crate::error::Result;
use crate::notify::NotificationMessage;
use crate::types::{NotificationReceipt, ObjectId, Status, Submission, SubmissionView};

/// Body of the push message sent when a submission is reviewed.
pub const STATUS_MESSAGE_CONTENT: &str =
    "Your mentor has reviewed your submission. Open the app to see the details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionFilter {
    All,
    ByStudent(ObjectId),
}

impl AdminService {
    pub fn list_submissions(&self, filter: SubmissionFilter) -> Result<Vec<SubmissionView>> {
        match filter {
            SubmissionFilter::All => self.store.list_submission_views(None),
            SubmissionFilter::ByStudent(id) => self.store.list_submission_views(Some(&id)),
        }
    }

    /// Sets a submission's status, then notifies its student and records a
    /// receipt.
    ///
    /// The status change is committed before the notification is attempted.
    /// Token lookup and delivery failures are logged only; a failure to
    /// write the receipt is returned, with the status change already applied.
    pub async fn edit_submission_status(
        &self,
        admin_id: &ObjectId,
        submission_id: &ObjectId,
        status: &str,
    ) -> Result<Submission> {
        let status: Status = status.parse()?;

        let submission = self.store.update_submission_status(submission_id, status)?;
        tracing::info!("Admin {admin_id} set submission {submission_id} to {status}");

        let student_id = submission.student_id;
        let heading = format!("Your task is {status}");

        match self.store.get_notification_token(&student_id) {
            Ok(Some(token)) => {
                let message =
                    NotificationMessage::english(token.token, &heading, STATUS_MESSAGE_CONTENT);
                if let Err(e) = self.notifier.send(&message).await {
                    tracing::warn!("Failed to notify student {student_id}: {e}");
                }
            }
            Ok(None) => {
                tracing::info!("Student {student_id} has no notification token, skipping push");
            }
            Err(e) => {
                tracing::warn!("Failed to look up notification token for {student_id}: {e}");
            }
        }

        self.store.create_notification(&NotificationReceipt {
            id: ObjectId::new(),
            student_id,
            title: heading,
            content: STATUS_MESSAGE_CONTENT.to_string(),
            image: None,
            created_at: Utc::now(),
        })?;

        Ok(submission)
    }
}
