use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const MAX_PLATE_LEN: usize = 10;

/// Canonical store key for a plate number.
pub fn normalize_plate_number(plate_number: &str) -> String {
    plate_number.to_uppercase()
}

/// A vehicle registration entry keyed by its plate number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[validate(schema(function = "validate_warrant"))]
pub struct PlateRecord {
    #[validate(
        length(min = 1, max = 10),
        custom(function = "validate_plate_number")
    )]
    pub plate_number: String,
    #[validate(length(min = 1))]
    pub owner_name: String,
    #[serde(rename = "dob", alias = "date_of_birth")]
    pub date_of_birth: NaiveDate,
    pub has_warrant: bool,
    /// Required when `has_warrant` is set.
    #[serde(default)]
    pub warrant_reason: Option<String>,
    pub registration_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_expiration_date: Option<NaiveDate>,
    pub is_stolen: bool,
}

fn validate_plate_number(plate_number: &str) -> Result<(), ValidationError> {
    if plate_number.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("plate_number_charset")
            .with_message("plate_number may only contain letters and digits".into()))
    }
}

fn validate_warrant(record: &PlateRecord) -> Result<(), ValidationError> {
    let has_reason = record
        .warrant_reason
        .as_deref()
        .is_some_and(|reason| !reason.trim().is_empty());

    if record.has_warrant && !has_reason {
        return Err(ValidationError::new("warrant_reason_required")
            .with_message("warrant_reason is required when has_warrant is true".into()));
    }
    Ok(())
}

impl PlateRecord {
    /// Returns the record with its plate number in store-key form.
    pub fn normalized(mut self) -> Self {
        self.plate_number = normalize_plate_number(&self.plate_number);
        self
    }

    pub fn alerts(&self) -> Vec<String> {
        let mut alerts = Vec::new();
        if self.has_warrant {
            let reason = self.warrant_reason.as_deref().unwrap_or("UNSPECIFIED");
            alerts.push(format!("WARRANT: {reason}"));
        }
        if self.is_stolen {
            alerts.push("STOLEN VEHICLE".to_string());
        }
        alerts
    }
}

/// Outcome of a plate lookup together with the alerts it raises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct PlateSearchResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PlateRecord>,
    pub alerts: Vec<String>,
}

impl PlateSearchResult {
    pub fn not_found() -> Self {
        Self {
            found: false,
            data: None,
            alerts: Vec::new(),
        }
    }

    pub fn found(record: PlateRecord) -> Self {
        Self {
            found: true,
            alerts: record.alerts(),
            data: Some(record),
        }
    }
}
