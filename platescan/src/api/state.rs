use std::sync::Arc;

use crate::config::Config;
use crate::db::PlateStore;
use crate::ocr::OcrProvider;
use crate::services::{ExtractionService, PlateService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub plates: PlateService,
    pub extraction: ExtractionService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn PlateStore>, ocr: OcrProvider) -> Self {
        let config = Arc::new(config);
        let plates = PlateService::new(store);
        let extraction =
            ExtractionService::new(ocr, plates.clone(), config.extract.placeholder_on_miss);

        Self {
            config,
            plates,
            extraction,
        }
    }
}
