use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS license_plates (
            plate_number TEXT PRIMARY KEY,
            owner_name TEXT NOT NULL,
            dob TEXT NOT NULL,
            has_warrant INTEGER NOT NULL DEFAULT 0,
            warrant_reason TEXT,
            registration_date TEXT NOT NULL,
            license_expiration_date TEXT,
            is_stolen INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .await?;

    Ok(())
}
