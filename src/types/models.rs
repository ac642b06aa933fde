use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ObjectId, Status};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: ObjectId,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub semester: String,
    pub domain: String,
    pub title: String,
    pub detail: String,
    pub creator_id: ObjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    #[serde(default)]
    pub domains: Vec<String>,
    pub dob: String,
    pub gender: String,
    pub phone_number: String,
    #[serde(default)]
    pub phone_number_alt: String,
    pub college: String,
    pub course: String,
    pub specialization: String,
    pub has_arrears: bool,
    pub place: String,
    pub semester: String,
    pub district: String,
    pub state: String,
    pub country: String,
    #[serde(default)]
    pub date_of_joining: String,
    #[serde(default)]
    pub course_ending_date: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub task_id: ObjectId,
    pub student_id: ObjectId,
    pub file_url: String,
    pub comment: String,
    pub status: Status,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "thumbnail")]
    pub thumb_url: String,
    #[serde(rename = "video")]
    pub video_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub title: String,
    pub organization: String,
    pub image: String,
    pub domain: String,
    #[serde(default)]
    pub videos: Vec<Video>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three lists of names an admin maintains for student sign-up forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Domain,
    College,
    Course,
}

impl ReferenceKind {
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            ReferenceKind::Domain => "domains",
            ReferenceKind::College => "colleges",
            ReferenceKind::Course => "courses",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ReferenceKind::Domain => "domain",
            ReferenceKind::College => "college",
            ReferenceKind::Course => "course",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub name: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationToken {
    pub student_id: ObjectId,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub id: ObjectId,
    pub student_id: ObjectId,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A submission joined with its student and task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionView {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "fileurl")]
    pub file_url: String,
    pub status: Status,
    pub comment: String,
    pub task: Task,
    pub student: StudentRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRef {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
}

/// Flattened reference lists, as served to clients and stored in the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub domains: Vec<String>,
    pub colleges: Vec<String>,
    pub courses: Vec<String>,
}
