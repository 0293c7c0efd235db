use tracing::{info, warn};

use crate::error::{PlateError, Result};
use crate::models::{placeholder_record, PlateRecord};
use crate::ocr::cleaner::{clean_plate_key, UNKNOWN_PLATE};
use crate::ocr::{ImageReference, OcrProvider};

use super::PlateService;

/// Result of reading a single plate from an image and looking it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// The plate matched a stored record.
    Found { plate: String, record: PlateRecord },
    /// No record matched and the fixed demo record is served instead.
    Placeholder { plate: String, record: PlateRecord },
    /// No record matched. `plate` may be the `UNKNOWN` sentinel.
    NotFound { plate: String },
}

/// One entry of a multi-plate extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateMatch {
    pub plate: String,
    pub record: Option<PlateRecord>,
}

#[derive(Clone)]
pub struct ExtractionService {
    ocr: OcrProvider,
    plates: PlateService,
    placeholder_on_miss: bool,
}

impl ExtractionService {
    pub fn new(ocr: OcrProvider, plates: PlateService, placeholder_on_miss: bool) -> Self {
        Self {
            ocr,
            plates,
            placeholder_on_miss,
        }
    }

    pub fn ocr(&self) -> &OcrProvider {
        &self.ocr
    }

    pub async fn extract(&self, image: &ImageReference) -> Result<ExtractOutcome> {
        let raw = self.ocr.extract_plate(image).await?;
        let plate = clean_plate_key(&raw);
        info!(source = image.kind(), plate = %plate, "Plate extracted from image");

        if plate != UNKNOWN_PLATE {
            if let Some(record) = self.plates.find(&plate).await? {
                return Ok(ExtractOutcome::Found { plate, record });
            }
        }

        if self.placeholder_on_miss {
            warn!(plate = %plate, "No record matched extracted plate; serving placeholder record");
            return Ok(ExtractOutcome::Placeholder {
                plate,
                record: placeholder_record(),
            });
        }

        Ok(ExtractOutcome::NotFound { plate })
    }

    /// Read every plate in the image and look each one up. Sentinel entries
    /// are dropped and repeated plates are reported once, in first-seen order.
    pub async fn extract_all(&self, image: &ImageReference) -> Result<Vec<PlateMatch>> {
        let entries = self.ocr.extract_plates(image).await?;

        let mut plates: Vec<String> = Vec::new();
        for entry in entries {
            let plate = clean_plate_key(&entry);
            if plate != UNKNOWN_PLATE && !plates.contains(&plate) {
                plates.push(plate);
            }
        }

        if plates.is_empty() {
            return Err(PlateError::NotFound(
                "No license plates found in image".to_string(),
            ));
        }
        info!(source = image.kind(), count = plates.len(), "Plates extracted from image");

        let mut matches = Vec::with_capacity(plates.len());
        for plate in plates {
            let record = self.plates.find(&plate).await?;
            matches.push(PlateMatch { plate, record });
        }
        Ok(matches)
    }
}
