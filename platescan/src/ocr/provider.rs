use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::OcrConfig;
use crate::error::{PlateError, Result};

use super::api::VisionApiClient;
use super::cleaner::{parse_plate_list, UNKNOWN_PLATE};
use super::image_ref::ImageReference;
use super::prompts::{MULTI_PLATE_PROMPT, SINGLE_PLATE_PROMPT};

#[derive(Clone)]
enum OcrBackend {
    Api { client: VisionApiClient },
    Unavailable { reason: String },
}

/// Reads plate text out of images with a vision model.
///
/// Construction never fails: a provider that cannot reach a model (for
/// example, no API key configured) reports itself unavailable and every
/// extraction call returns [`PlateError::OcrUnavailable`].
#[derive(Clone)]
pub struct OcrProvider {
    backend: OcrBackend,
    config: OcrConfig,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Self {
        let backend = match VisionApiClient::new(config) {
            Ok(client) => {
                info!(model = %config.model, base_url = %client.base_url(), "Vision OCR backend initialized");
                OcrBackend::Api { client }
            }
            Err(e) => {
                let reason = format!("Vision OCR backend unavailable: {e}");
                warn!("{}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Self {
            backend,
            config: config.clone(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: OcrBackend::Unavailable {
                reason: reason.into(),
            },
            config: OcrConfig::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Raw single-plate reply. Empty output becomes the sentinel.
    pub async fn extract_plate(&self, image: &ImageReference) -> Result<String> {
        let reply = self.dispatch(SINGLE_PLATE_PROMPT, image).await?;
        if reply.is_empty() {
            return Ok(UNKNOWN_PLATE.to_string());
        }
        Ok(reply)
    }

    /// Multi-plate reply parsed into its entries, sentinel entries included.
    pub async fn extract_plates(&self, image: &ImageReference) -> Result<Vec<String>> {
        let reply = self.dispatch(MULTI_PLATE_PROMPT, image).await?;
        Ok(parse_plate_list(&reply))
    }

    async fn dispatch(&self, prompt: &str, image: &ImageReference) -> Result<String> {
        let image_url = image.resolve()?;

        let client = match &self.backend {
            OcrBackend::Api { client } => client,
            OcrBackend::Unavailable { reason } => {
                return Err(PlateError::OcrUnavailable(reason.clone()))
            }
        };

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let started = Instant::now();

        let result =
            tokio::time::timeout(timeout_duration, client.complete(prompt, &image_url)).await;

        match result {
            Ok(inner_result) => {
                let reply = inner_result?;
                debug!(
                    source = image.kind(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    reply_len = reply.len(),
                    "OCR reply received"
                );
                Ok(reply)
            }
            Err(_) => Err(PlateError::Ocr(format!(
                "OCR request timed out after {} seconds",
                self.config.timeout_secs
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(model: &str, api_key: Option<&str>) -> OcrConfig {
        OcrConfig {
            model: model.to_string(),
            api_key: api_key.map(String::from),
            ..OcrConfig::default()
        }
    }

    #[test]
    fn test_openai_model_without_api_key_falls_back_to_unavailable() {
        let provider = OcrProvider::new(&make_config("openai/gpt-4o-mini", None));
        assert!(!provider.is_available());
    }

    #[test]
    fn test_openai_model_with_api_key_is_available() {
        let provider = OcrProvider::new(&make_config("openai/gpt-4o-mini", Some("k")));
        assert!(provider.is_available());
        assert_eq!(provider.model(), "openai/gpt-4o-mini");
    }

    #[test]
    fn test_clone_keeps_availability() {
        let provider = OcrProvider::new(&make_config("ollama/llava", None));
        let cloned = provider.clone();
        assert_eq!(provider.is_available(), cloned.is_available());
    }

    #[tokio::test]
    async fn test_unavailable_returns_error() {
        let provider = OcrProvider::unavailable("Test unavailable");
        let image = ImageReference::Url("https://example.com/car.jpg".to_string());

        let single = provider.extract_plate(&image).await;
        assert!(matches!(single, Err(PlateError::OcrUnavailable(_))));

        let multi = provider.extract_plates(&image).await;
        assert!(matches!(multi, Err(PlateError::OcrUnavailable(_))));
    }

    #[tokio::test]
    async fn test_invalid_image_is_rejected_before_dispatch() {
        let provider = OcrProvider::unavailable("Test unavailable");
        let result = provider
            .extract_plate(&ImageReference::Upload(Vec::new()))
            .await;
        assert!(matches!(result, Err(PlateError::Validation(_))));
    }
}
