use chrono::Utc;
use serde::Deserialize;

use super::AdminService;
use super::validation::{require_fields, resolve_id};
use crate::error::{Error, Result};
use crate::types::{ObjectId, Task};

/// Task payload for create and save.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
    #[serde(default, rename = "_id", alias = "id", alias = "ID")]
    pub id: Option<String>,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

impl TaskInput {
    pub fn validate(&self) -> Result<()> {
        require_fields(&[
            ("semester", &self.semester),
            ("domain", &self.domain),
            ("title", &self.title),
            ("detail", &self.detail),
        ])
    }

    fn to_task(&self, id: ObjectId, creator_id: ObjectId) -> Task {
        let now = Utc::now();
        Task {
            id,
            semester: self.semester.trim().to_string(),
            domain: self.domain.trim().to_string(),
            title: self.title.trim().to_string(),
            detail: self.detail.trim().to_string(),
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl AdminService {
    pub fn create_task(&self, input: &TaskInput, creator_id: &ObjectId) -> Result<Task> {
        input.validate()?;

        let task = input.to_task(ObjectId::new(), *creator_id);
        self.store.create_task(&task)?;
        tracing::info!("Admin {creator_id} created task {}", task.id);
        Ok(task)
    }

    /// Saves a task by id. An unknown id inserts a new task owned by
    /// `admin_id`; a known id keeps its original creator.
    pub fn update_task(&self, input: &TaskInput, admin_id: &ObjectId) -> Result<Task> {
        input.validate()?;
        let id = resolve_id(input.id.as_deref())?;

        self.store.upsert_task(&input.to_task(id, *admin_id))?;
        tracing::info!("Admin {admin_id} saved task {id}");
        self.store.get_task(&id)?.ok_or(Error::NotFound)
    }

    pub fn delete_task(&self, id: &ObjectId) -> Result<()> {
        if !self.store.delete_task(id)? {
            tracing::info!("No task {id} to delete");
            return Err(Error::NotFound);
        }
        tracing::info!("Deleted task {id}");
        Ok(())
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.store.list_tasks()
    }
}
