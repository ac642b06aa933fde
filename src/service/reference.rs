use chrono::Utc;

use super::AdminService;
use super::validation::validate_reference_name;
use crate::cache::{REFERENCE_DATA_KEY, REFERENCE_DATA_TTL};
use crate::error::Result;
use crate::types::{ReferenceData, ReferenceItem, ReferenceKind};

impl AdminService {
    /// Adds a name to one of the reference lists. Repeating a name refreshes
    /// its timestamp. The cached lists are left alone and pick the name up
    /// when they expire.
    pub fn create_reference(&self, kind: ReferenceKind, name: &str) -> Result<ReferenceItem> {
        validate_reference_name(name, kind.label())?;

        let item = ReferenceItem {
            name: name.trim().to_string(),
            created_on: Utc::now(),
        };
        self.store.upsert_reference(kind, &item)?;
        tracing::info!("Saved {} '{}'", kind.label(), item.name);
        Ok(item)
    }

    /// Returns all three reference lists, served from the cache when possible.
    pub async fn reference_data(&self) -> Result<ReferenceData> {
        match self.cache.get(REFERENCE_DATA_KEY).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<ReferenceData>(&bytes) {
                Ok(data) => return Ok(data),
                Err(e) => tracing::warn!("Discarding undecodable cached reference data: {e}"),
            },
            Ok(None) => tracing::debug!("Reference data cache miss"),
            Err(e) => tracing::warn!("Reference data cache read failed: {e}"),
        }

        let data = ReferenceData {
            domains: self.reference_names(ReferenceKind::Domain)?,
            colleges: self.reference_names(ReferenceKind::College)?,
            courses: self.reference_names(ReferenceKind::Course)?,
        };

        let bytes = serde_json::to_vec(&data)?;
        if let Err(e) = self
            .cache
            .set(REFERENCE_DATA_KEY, &bytes, REFERENCE_DATA_TTL)
            .await
        {
            tracing::warn!("Failed to cache reference data: {e}");
        }

        Ok(data)
    }

    fn reference_names(&self, kind: ReferenceKind) -> Result<Vec<String>> {
        Ok(self
            .store
            .list_references(kind)?
            .into_iter()
            .map(|item| item.name)
            .collect())
    }
}
