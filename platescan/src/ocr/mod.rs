//! Plate extraction from images.
//!
//! An [`ImageReference`] names the image (URL, upload or base64 payload) and
//! resolves to the string handed to the vision model. [`OcrProvider`] sends it
//! with a fixed instruction prompt to an OpenAI-compatible chat endpoint, and
//! the [`cleaner`] turns the reply into lookup-ready plate text.

mod api;
pub mod cleaner;
pub mod image_ref;
pub mod prompts;
mod provider;

pub use api::VisionApiClient;
pub use cleaner::{clean_plate_key, clean_plate_text, parse_plate_list, UNKNOWN_PLATE};
pub use image_ref::{detect_image_type, ImageReference, ImageType};
pub use provider::OcrProvider;
