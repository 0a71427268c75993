use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use image::DynamicImage;
use thiserror::Error;

/// Standard alphabet; browsers and hand-rolled clients disagree on padding, so
/// both padded and unpadded input is accepted.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),
}

/// Drop a `data:image/...;base64,` header if present.
pub fn strip_data_uri(payload: &str) -> &str {
    let trimmed = payload.trim_start();
    if trimmed.starts_with("data:") {
        if let Some((_, data)) = trimmed.split_once(',') {
            return data;
        }
    }
    payload
}

/// Decode a base64 image payload (optionally data-URI prefixed) to raw bytes.
/// Line breaks and other whitespace inside the base64 text are ignored.
pub fn decode_image_bytes(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = strip_data_uri(payload)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(PAYLOAD_ENGINE.decode(compact)?)
}

/// Decode a base64 image payload all the way to pixels.
pub fn decode_image(payload: &str) -> Result<DynamicImage, DecodeError> {
    let bytes = decode_image_bytes(payload)?;
    Ok(image::load_from_memory(&bytes)?)
}
