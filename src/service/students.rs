use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AdminService;
use crate::error::Result;
use crate::types::{ObjectId, Student};

/// A student's profile as shown to admins. Credentials are not included.
#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub domains: Vec<String>,
    pub dob: String,
    pub gender: String,
    pub phone_number: String,
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
    pub date_of_joining: String,
    pub course_ending_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            username: s.username,
            email: s.email,
            first_name: s.first_name,
            middle_name: s.middle_name,
            last_name: s.last_name,
            domains: s.domains,
            dob: s.dob,
            gender: s.gender,
            phone_number: s.phone_number,
            phone_number_alt: s.phone_number_alt,
            college: s.college,
            course: s.course,
            specialization: s.specialization,
            has_arrears: s.has_arrears,
            place: s.place,
            semester: s.semester,
            district: s.district,
            state: s.state,
            country: s.country,
            date_of_joining: s.date_of_joining,
            course_ending_date: s.course_ending_date,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl AdminService {
    pub fn list_students(&self) -> Result<Vec<StudentResponse>> {
        Ok(self
            .store
            .list_students()?
            .into_iter()
            .map(StudentResponse::from)
            .collect())
    }
}
