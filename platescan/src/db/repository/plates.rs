use chrono::NaiveDate;
use libsql::{params, Connection};

use crate::error::{PlateError, Result};
use crate::models::PlateRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct PlateRepository;

impl PlateRepository {
    pub async fn get(conn: &Connection, plate_number: &str) -> Result<Option<PlateRecord>> {
        let mut rows = conn
            .query(
                "SELECT * FROM license_plates WHERE plate_number = ?1",
                params![plate_number],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_record(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn upsert(conn: &Connection, record: &PlateRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO license_plates (
                plate_number, owner_name, dob, has_warrant, warrant_reason,
                registration_date, license_expiration_date, is_stolen
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(plate_number) DO UPDATE SET
                owner_name = excluded.owner_name,
                dob = excluded.dob,
                has_warrant = excluded.has_warrant,
                warrant_reason = excluded.warrant_reason,
                registration_date = excluded.registration_date,
                license_expiration_date = excluded.license_expiration_date,
                is_stolen = excluded.is_stolen
            "#,
            params![
                record.plate_number.clone(),
                record.owner_name.clone(),
                record.date_of_birth.format(DATE_FORMAT).to_string(),
                record.has_warrant as i64,
                record.warrant_reason.clone(),
                record.registration_date.format(DATE_FORMAT).to_string(),
                record
                    .license_expiration_date
                    .map(|d| d.format(DATE_FORMAT).to_string()),
                record.is_stolen as i64,
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn delete(conn: &Connection, plate_number: &str) -> Result<bool> {
        let rows_affected = conn
            .execute(
                "DELETE FROM license_plates WHERE plate_number = ?1",
                params![plate_number],
            )
            .await?;

        Ok(rows_affected > 0)
    }

    pub async fn list(conn: &Connection) -> Result<Vec<PlateRecord>> {
        let mut rows = conn
            .query("SELECT * FROM license_plates ORDER BY plate_number", ())
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_record(&row)?);
        }
        Ok(results)
    }

    pub async fn count(conn: &Connection) -> Result<u64> {
        let mut rows = conn
            .query("SELECT COUNT(*) FROM license_plates", ())
            .await?;
        let total: i64 = if let Some(row) = rows.next().await? {
            row.get(0)?
        } else {
            0
        };
        Ok(total.max(0) as u64)
    }

    fn row_to_record(row: &libsql::Row) -> Result<PlateRecord> {
        Ok(PlateRecord {
            plate_number: row.get(0)?,
            owner_name: row.get(1)?,
            date_of_birth: parse_date(&row.get::<String>(2)?)?,
            has_warrant: row.get::<i64>(3)? != 0,
            warrant_reason: row.get(4)?,
            registration_date: parse_date(&row.get::<String>(5)?)?,
            license_expiration_date: row
                .get::<Option<String>>(6)?
                .map(|value| parse_date(&value))
                .transpose()?,
            is_stolen: row.get::<i64>(7)? != 0,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| PlateError::Internal(format!("Invalid stored date '{value}': {e}")))
}
