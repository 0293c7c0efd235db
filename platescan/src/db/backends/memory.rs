use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::traits::PlateStore;
use crate::error::Result;
use crate::models::{normalize_plate_number, PlateRecord};

/// Process-local store. Mutations are serialised by the lock; nothing
/// survives a restart.
#[derive(Default)]
pub struct InMemoryBackend {
    plates: RwLock<HashMap<String, PlateRecord>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlateStore for InMemoryBackend {
    async fn get_plate(&self, plate_number: &str) -> Result<Option<PlateRecord>> {
        let key = normalize_plate_number(plate_number);
        Ok(self.plates.read().await.get(&key).cloned())
    }

    async fn upsert_plate(&self, record: &PlateRecord) -> Result<()> {
        let record = record.clone().normalized();
        self.plates
            .write()
            .await
            .insert(record.plate_number.clone(), record);
        Ok(())
    }

    async fn delete_plate(&self, plate_number: &str) -> Result<bool> {
        let key = normalize_plate_number(plate_number);
        Ok(self.plates.write().await.remove(&key).is_some())
    }

    async fn list_plates(&self) -> Result<Vec<PlateRecord>> {
        let mut records: Vec<PlateRecord> = self.plates.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.plate_number.cmp(&b.plate_number));
        Ok(records)
    }

    async fn count_plates(&self) -> Result<u64> {
        Ok(self.plates.read().await.len() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
