mod extraction;
mod plates;

pub use extraction::{ExtractOutcome, ExtractionService, PlateMatch};
pub use plates::PlateService;
