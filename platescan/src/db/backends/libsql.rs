use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::PlateRepository;
use crate::db::traits::PlateStore;
use crate::error::Result;
use crate::models::{normalize_plate_number, PlateRecord};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlateStore for LibSqlBackend {
    async fn get_plate(&self, plate_number: &str) -> Result<Option<PlateRecord>> {
        let key = normalize_plate_number(plate_number);
        PlateRepository::get(self.db.conn(), &key).await
    }

    async fn upsert_plate(&self, record: &PlateRecord) -> Result<()> {
        let record = record.clone().normalized();
        PlateRepository::upsert(self.db.conn(), &record).await
    }

    async fn delete_plate(&self, plate_number: &str) -> Result<bool> {
        let key = normalize_plate_number(plate_number);
        PlateRepository::delete(self.db.conn(), &key).await
    }

    async fn list_plates(&self) -> Result<Vec<PlateRecord>> {
        PlateRepository::list(self.db.conn()).await
    }

    async fn count_plates(&self) -> Result<u64> {
        PlateRepository::count(self.db.conn()).await
    }

    fn backend_name(&self) -> &'static str {
        "libsql"
    }
}
