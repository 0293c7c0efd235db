use async_trait::async_trait;

use crate::error::Result;
use crate::models::PlateRecord;

/// Storage for plate records keyed by upper-cased plate number.
///
/// Implementations normalise every plate number they receive, so callers may
/// pass keys in any case.
#[async_trait]
pub trait PlateStore: Send + Sync {
    async fn get_plate(&self, plate_number: &str) -> Result<Option<PlateRecord>>;
    /// Insert or replace. The stored record carries the normalised plate number.
    async fn upsert_plate(&self, record: &PlateRecord) -> Result<()>;
    /// Returns whether a record existed.
    async fn delete_plate(&self, plate_number: &str) -> Result<bool>;
    /// All records ordered by plate number.
    async fn list_plates(&self) -> Result<Vec<PlateRecord>>;
    async fn count_plates(&self) -> Result<u64>;

    /// Short backend label reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}
