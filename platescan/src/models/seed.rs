use chrono::NaiveDate;

use super::PlateRecord;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Records loaded into a fresh store at startup.
pub fn seed_records() -> Vec<PlateRecord> {
    vec![
        PlateRecord {
            plate_number: "ABC1234".to_string(),
            owner_name: "John Doe".to_string(),
            date_of_birth: date(1985, 6, 15),
            has_warrant: false,
            warrant_reason: None,
            registration_date: date(2020, 1, 10),
            license_expiration_date: None,
            is_stolen: false,
        },
        PlateRecord {
            plate_number: "XYZ789".to_string(),
            owner_name: "Jane Smith".to_string(),
            date_of_birth: date(1990, 11, 22),
            has_warrant: true,
            warrant_reason: Some("Unpaid parking tickets".to_string()),
            registration_date: date(2019, 3, 5),
            license_expiration_date: None,
            is_stolen: false,
        },
        PlateRecord {
            plate_number: "LMN456".to_string(),
            owner_name: "Alice Johnson".to_string(),
            date_of_birth: date(1978, 2, 28),
            has_warrant: false,
            warrant_reason: None,
            registration_date: date(2021, 7, 19),
            license_expiration_date: None,
            is_stolen: true,
        },
        PlateRecord {
            plate_number: "DEF321".to_string(),
            owner_name: "Bob Brown".to_string(),
            date_of_birth: date(2000, 12, 12),
            has_warrant: true,
            warrant_reason: Some("Speeding violations".to_string()),
            registration_date: date(2018, 9, 30),
            license_expiration_date: None,
            is_stolen: false,
        },
    ]
}

/// Fabricated record served for unmatched extractions when
/// `EXTRACT_PLACEHOLDER_ON_MISS` is enabled. Demo behaviour only.
pub fn placeholder_record() -> PlateRecord {
    PlateRecord {
        plate_number: "TJX 9717".to_string(),
        owner_name: "Matias Pena".to_string(),
        date_of_birth: date(2004, 1, 13),
        has_warrant: true,
        warrant_reason: Some("Hello!".to_string()),
        registration_date: date(2025, 9, 28),
        license_expiration_date: Some(date(2025, 12, 31)),
        is_stolen: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_seed_records_are_valid_and_uppercase() {
        for record in seed_records() {
            assert!(record.validate().is_ok(), "{} should validate", record.plate_number);
            assert_eq!(record.plate_number, record.plate_number.to_uppercase());
        }
    }

    #[test]
    fn test_placeholder_raises_both_alerts() {
        let alerts = placeholder_record().alerts();
        assert_eq!(alerts, vec!["WARRANT: Hello!", "STOLEN VEHICLE"]);
    }
}
