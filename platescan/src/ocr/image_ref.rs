//! Image reference resolution.
//!
//! Every extraction request names its image in exactly one way: a remote URL,
//! an uploaded file, or a base64 payload. [`ImageReference::resolve`] turns
//! any of them into the single string the vision model accepts, either the
//! URL itself or a `data:image/<type>;base64,<payload>` URL.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{PlateError, Result};

/// Decoded payloads shorter than this cannot be a real image.
pub const MIN_IMAGE_BYTES: usize = 100;

const DATA_IMAGE_PREFIX: &str = "data:image/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl ImageType {
    /// MIME subtype, as used after `image/`.
    pub fn subtype(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "jpeg",
            ImageType::Png => "png",
            ImageType::Gif => "gif",
            ImageType::WebP => "webp",
            ImageType::Bmp => "bmp",
            ImageType::Tiff => "tiff",
        }
    }
}

/// Classify image bytes by their leading signature. Unrecognised data is
/// assumed to be JPEG.
pub fn detect_image_type(bytes: &[u8]) -> ImageType {
    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return ImageType::Jpeg;
    }
    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return ImageType::Png;
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return ImageType::Gif;
    }
    // WebP: RIFF....WEBP
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return ImageType::WebP;
    }
    if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
    {
        return ImageType::Tiff;
    }
    if bytes.starts_with(b"BM") {
        return ImageType::Bmp;
    }
    ImageType::Jpeg
}

/// Wrap raw image bytes in a data URL typed from their signature.
pub fn bytes_to_data_url(bytes: &[u8]) -> String {
    let image_type = detect_image_type(bytes);
    format!(
        "data:image/{};base64,{}",
        image_type.subtype(),
        STANDARD.encode(bytes)
    )
}

/// Normalise a client-supplied base64 string into a data URL.
///
/// Data URLs pass through untouched. Anything else is percent-decoded,
/// stripped of whitespace and strictly decoded; the cleaned payload is
/// reused verbatim in the result.
pub fn base64_to_data_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with(DATA_IMAGE_PREFIX) {
        return Ok(trimmed.to_string());
    }

    let unescaped = urlencoding::decode(trimmed)
        .map_err(|e| PlateError::Validation(format!("Invalid base64 image data: {e}")))?;
    let payload: String = unescaped.chars().filter(|c| !c.is_whitespace()).collect();

    let decoded = STANDARD
        .decode(payload.as_bytes())
        .map_err(|_| PlateError::Validation("Invalid base64 encoding".to_string()))?;

    if decoded.len() < MIN_IMAGE_BYTES {
        return Err(PlateError::Validation(
            "Base64 data too small to be a valid image".to_string(),
        ));
    }

    let image_type = detect_image_type(&decoded);
    Ok(format!("data:image/{};base64,{payload}", image_type.subtype()))
}

/// One image named by an extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    Url(String),
    Upload(Vec<u8>),
    Base64(String),
}

impl ImageReference {
    /// Build a reference from the optional request inputs. Exactly one must
    /// be supplied.
    pub fn from_sources(
        image_url: Option<String>,
        upload: Option<Vec<u8>>,
        base64_image: Option<String>,
    ) -> Result<Self> {
        let supplied =
            image_url.is_some() as usize + upload.is_some() as usize + base64_image.is_some() as usize;

        if supplied == 0 {
            return Err(PlateError::Validation(
                "Provide either image_url, file, or base64_image.".to_string(),
            ));
        }
        if supplied > 1 {
            return Err(PlateError::Validation(
                "Provide only one input method: image_url, file, or base64_image.".to_string(),
            ));
        }

        if let Some(url) = image_url {
            return Ok(Self::Url(url));
        }
        if let Some(bytes) = upload {
            return Ok(Self::Upload(bytes));
        }
        match base64_image {
            Some(data) => Ok(Self::Base64(data)),
            None => Err(PlateError::Internal("No image source selected".to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ImageReference::Url(_) => "url",
            ImageReference::Upload(_) => "upload",
            ImageReference::Base64(_) => "base64",
        }
    }

    /// Produce the image string handed to the vision model.
    pub fn resolve(&self) -> Result<String> {
        match self {
            ImageReference::Url(url) => validate_image_url(url),
            ImageReference::Upload(bytes) => {
                if bytes.is_empty() {
                    return Err(PlateError::Validation("Empty file.".to_string()));
                }
                Ok(bytes_to_data_url(bytes))
            }
            ImageReference::Base64(data) => {
                if data.trim().is_empty() {
                    return Err(PlateError::Validation(
                        "base64_image cannot be empty".to_string(),
                    ));
                }
                base64_to_data_url(data)
            }
        }
    }
}

fn validate_image_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlateError::Validation("image_url cannot be empty".to_string()));
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| PlateError::Validation(format!("Invalid image_url: {e}")))?;
    match parsed.scheme() {
        "http" | "https" | "data" => Ok(trimmed.to_string()),
        other => Err(PlateError::Validation(format!(
            "Unsupported image_url scheme '{other}': use http, https or data"
        ))),
    }
}
