use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AdminService;
use super::validation::{require_fields, resolve_id};
use crate::error::{Error, Result};
use crate::types::{Mentor, ObjectId, Video};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentorInput {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub videos: Vec<Video>,
}

impl MentorInput {
    pub fn validate(&self) -> Result<()> {
        require_fields(&[
            ("name", &self.name),
            ("title", &self.title),
            ("organization", &self.organization),
            ("image", &self.image),
            ("domain", &self.domain),
        ])
    }

    fn to_mentor(&self, id: ObjectId) -> Mentor {
        let now = Utc::now();
        Mentor {
            id,
            name: self.name.trim().to_string(),
            title: self.title.trim().to_string(),
            organization: self.organization.trim().to_string(),
            image: self.image.trim().to_string(),
            domain: self.domain.trim().to_string(),
            videos: self.videos.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MentorResponse {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub title: String,
    pub organization: String,
    pub domain: String,
    pub image: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Video>,
    pub created_at: DateTime<Utc>,
}

impl From<Mentor> for MentorResponse {
    fn from(m: Mentor) -> Self {
        Self {
            id: m.id,
            name: m.name,
            title: m.title,
            organization: m.organization,
            domain: m.domain,
            image: m.image,
            videos: m.videos,
            created_at: m.created_at,
        }
    }
}

impl AdminService {
    pub fn create_mentor(&self, input: &MentorInput) -> Result<Mentor> {
        input.validate()?;

        let mentor = input.to_mentor(ObjectId::new());
        self.store.create_mentor(&mentor).inspect_err(|e| {
            if matches!(e, Error::AlreadyExists) {
                tracing::info!("Mentor '{}' already exists", mentor.name);
            }
        })?;
        tracing::info!("Created mentor '{}' ({})", mentor.name, mentor.id);
        Ok(mentor)
    }

    /// Saves a mentor by id, inserting it if the id is unknown.
    pub fn update_mentor(&self, input: &MentorInput) -> Result<Mentor> {
        input.validate()?;
        let id = resolve_id(input.id.as_deref())?;

        self.store.upsert_mentor(&input.to_mentor(id))?;
        tracing::info!("Saved mentor {id}");
        self.store.get_mentor(&id)?.ok_or(Error::NotFound)
    }

    pub fn list_mentors(&self) -> Result<Vec<MentorResponse>> {
        Ok(self
            .store
            .list_mentors()?
            .into_iter()
            .map(MentorResponse::from)
            .collect())
    }
}
