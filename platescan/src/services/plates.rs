use std::sync::Arc;

use validator::Validate;

use crate::db::PlateStore;
use crate::error::{PlateError, Result};
use crate::models::{normalize_plate_number, PlateRecord, PlateSearchResult};

/// Plate record operations over a shared store.
#[derive(Clone)]
pub struct PlateService {
    store: Arc<dyn PlateStore>,
}

impl PlateService {
    pub fn new(store: Arc<dyn PlateStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub async fn count(&self) -> Result<u64> {
        self.store.count_plates().await
    }

    /// Case-insensitive lookup. `None` when no record matches.
    pub async fn find(&self, plate_number: &str) -> Result<Option<PlateRecord>> {
        self.store.get_plate(plate_number).await
    }

    pub async fn lookup(&self, plate_number: &str) -> Result<PlateRecord> {
        self.find(plate_number)
            .await?
            .ok_or_else(|| PlateError::NotFound("License plate not found".to_string()))
    }

    /// Validate and upsert. Returns the stored (normalised) record.
    pub async fn add(&self, record: PlateRecord) -> Result<PlateRecord> {
        record.validate()?;
        let record = record.normalized();
        self.store.upsert_plate(&record).await?;
        tracing::info!(plate = %record.plate_number, "Plate record stored");
        Ok(record)
    }

    /// Remove a record. A missing plate is reported as `NotFound`.
    pub async fn remove(&self, plate_number: &str) -> Result<String> {
        let key = normalize_plate_number(plate_number);
        if !self.store.delete_plate(&key).await? {
            return Err(PlateError::NotFound("License plate not found".to_string()));
        }
        tracing::info!(plate = %key, "Plate record removed");
        Ok(key)
    }

    pub async fn list(&self) -> Result<Vec<PlateRecord>> {
        self.store.list_plates().await
    }

    pub async fn search_with_alerts(&self, plate_number: &str) -> Result<PlateSearchResult> {
        Ok(match self.find(plate_number).await? {
            Some(record) => PlateSearchResult::found(record),
            None => PlateSearchResult::not_found(),
        })
    }

    /// Insert the records that are not already stored. Existing records are
    /// left untouched so a persistent store keeps its edits across restarts.
    pub async fn seed(&self, records: Vec<PlateRecord>) -> Result<usize> {
        let mut inserted = 0;
        for record in records {
            if self.find(&record.plate_number).await?.is_none() {
                self.store.upsert_plate(&record.normalized()).await?;
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
