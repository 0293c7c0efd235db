pub mod backends;
mod connection;
pub mod repository;
pub(crate) mod schema;
pub mod traits;

use std::sync::Arc;

pub use backends::libsql::LibSqlBackend;
pub use backends::memory::InMemoryBackend;
pub use connection::Database;
pub use traits::*;

use crate::config::StoreConfig;
use crate::error::Result;

/// Open the store selected by `config`: libsql when a database URL is set,
/// process memory otherwise.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn PlateStore>> {
    match &config.database_url {
        Some(url) => {
            tracing::info!(url = %url, "Opening libsql plate store");
            let db = Database::new(url, config).await?;
            Ok(Arc::new(LibSqlBackend::new(db)))
        }
        None => {
            tracing::info!("Using in-memory plate store");
            Ok(Arc::new(InMemoryBackend::new()))
        }
    }
}
