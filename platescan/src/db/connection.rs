use libsql::{Builder, Connection};

use crate::config::StoreConfig;
use crate::error::Result;

use super::schema;

/// A libsql database plus the connection all plate queries share. Holding a
/// single connection keeps `:memory:` databases alive for the process.
pub struct Database {
    _db: libsql::Database,
    conn: Connection,
    busy_timeout_ms: u64,
    journal_mode: String,
}

impl Database {
    /// Open `url` with the token and pragmas from `config`.
    pub async fn new(url: &str, config: &StoreConfig) -> Result<Self> {
        let auth_token = config.auth_token.as_deref();
        let busy_timeout_ms = config.busy_timeout_ms;
        let journal_mode = normalize_journal_mode(&config.journal_mode).to_string();

        let db = if url.starts_with("libsql://") || url.starts_with("https://") {
            Builder::new_remote(url.to_string(), auth_token.unwrap_or_default().to_string())
                .build()
                .await?
        } else if url == ":memory:" {
            Builder::new_local(":memory:").build().await?
        } else {
            let path = url.strip_prefix("file:").unwrap_or(url);
            Builder::new_local(path).build().await?
        };
        let conn = db.connect()?;

        let database = Self {
            _db: db,
            conn,
            busy_timeout_ms,
            journal_mode,
        };
        database.configure_database().await;
        schema::init_schema(&database.conn).await?;

        Ok(database)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    async fn configure_database(&self) {
        let busy_timeout_sql = format!("PRAGMA busy_timeout = {}", self.busy_timeout_ms);
        if let Err(error) = self.conn.execute_batch(&busy_timeout_sql).await {
            tracing::warn!(
                busy_timeout_ms = self.busy_timeout_ms,
                error = %error,
                "Failed to set SQLite busy_timeout"
            );
        }

        let journal_sql = format!("PRAGMA journal_mode = {}", self.journal_mode);
        if let Err(error) = self.conn.execute_batch(&journal_sql).await {
            tracing::warn!(
                mode = %self.journal_mode,
                error = %error,
                "Failed to set SQLite journal_mode"
            );
        }
    }
}

fn normalize_journal_mode(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "DELETE" => "DELETE",
        "TRUNCATE" => "TRUNCATE",
        "PERSIST" => "PERSIST",
        "MEMORY" => "MEMORY",
        "WAL" => "WAL",
        "OFF" => "OFF",
        _ => "WAL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_journal_mode() {
        assert_eq!(normalize_journal_mode("delete"), "DELETE");
        assert_eq!(normalize_journal_mode(" wal "), "WAL");
        assert_eq!(normalize_journal_mode("bogus"), "WAL");
    }
}
