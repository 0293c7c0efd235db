//! Extraction request/response DTOs.
//!
//! An extraction answers with the plate read from the image and, when a
//! record is attached, that record's fields inline next to it:
//!
//! ```json
//! { "plate": "XYZ789", "found": true, "owner_name": "Jane Smith", "dob": "1990-11-22", ... }
//! { "plate": "QQQ111", "found": false }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PlateRecord;
use crate::services::PlateMatch;

/// Query parameters accepted by `POST /extract`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExtractQuery {
    /// Remote image URL (`http`, `https` or `data`).
    pub image_url: Option<String>,
    /// Base64 image payload or data URL.
    pub base64_image: Option<String>,
}

/// Body of `POST /extract-base64` and `POST /extract-all-plates-base64`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct Base64ImageRequest {
    /// Base64 image payload or `data:image/...` URL.
    pub base64_image: String,
}

/// Multipart form accepted by `POST /extract`.
#[derive(Debug, utoipa::ToSchema)]
pub struct ExtractUploadForm {
    /// Image file.
    #[schema(value_type = Option<String>, format = Binary)]
    pub file: Option<Vec<u8>>,
}

/// One plate read from an image, with its record when one is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PlateMatchResponse {
    /// Cleaned plate text with spaces removed.
    pub plate: String,
    /// Whether the plate matched a stored record.
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_warrant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warrant_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_stolen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<String>>,
}

impl PlateMatchResponse {
    pub fn unmatched(plate: String) -> Self {
        Self {
            plate,
            found: false,
            owner_name: None,
            dob: None,
            has_warrant: None,
            warrant_reason: None,
            registration_date: None,
            license_expiration_date: None,
            is_stolen: None,
            alerts: None,
        }
    }

    pub fn matched(plate: String, record: PlateRecord) -> Self {
        Self {
            plate,
            found: true,
            alerts: Some(record.alerts()),
            owner_name: Some(record.owner_name),
            dob: Some(record.date_of_birth),
            has_warrant: Some(record.has_warrant),
            warrant_reason: record.warrant_reason,
            registration_date: Some(record.registration_date),
            license_expiration_date: record.license_expiration_date,
            is_stolen: Some(record.is_stolen),
        }
    }

    /// The fabricated stand-in record. It names its own plate and is never
    /// reported as found.
    pub fn placeholder(record: PlateRecord) -> Self {
        let plate = record.plate_number.clone();
        Self {
            found: false,
            ..Self::matched(plate, record)
        }
    }
}

impl From<PlateMatch> for PlateMatchResponse {
    fn from(entry: PlateMatch) -> Self {
        match entry.record {
            Some(record) => Self::matched(entry.plate, record),
            None => Self::unmatched(entry.plate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{placeholder_record, seed_records};

    #[test]
    fn matched_response_inlines_record_fields() {
        let record = seed_records()
            .into_iter()
            .find(|r| r.plate_number == "XYZ789")
            .unwrap();
        let json = serde_json::to_value(PlateMatchResponse::matched("XYZ789".into(), record))
            .expect("serialize");

        assert_eq!(json["plate"], "XYZ789");
        assert_eq!(json["found"], true);
        assert_eq!(json["owner_name"], "Jane Smith");
        assert_eq!(json["dob"], "1990-11-22");
        assert_eq!(json["warrant_reason"], "Unpaid parking tickets");
        assert_eq!(json["alerts"][0], "WARRANT: Unpaid parking tickets");
    }

    #[test]
    fn unmatched_response_carries_no_record_fields() {
        let json = serde_json::to_value(PlateMatchResponse::unmatched("QQQ111".into()))
            .expect("serialize");
        assert_eq!(json, serde_json::json!({"plate": "QQQ111", "found": false}));
    }

    #[test]
    fn placeholder_response_names_its_own_plate() {
        let resp = PlateMatchResponse::placeholder(placeholder_record());
        assert_eq!(resp.plate, "TJX 9717");
        assert!(!resp.found);
        assert_eq!(resp.owner_name.as_deref(), Some("Matias Pena"));
        assert_eq!(
            resp.license_expiration_date,
            NaiveDate::from_ymd_opt(2025, 12, 31)
        );
    }
}
