//! OpenEXR encoding of linear RGBA f32 buffers. Samples are stored as f32, so
//! a round trip is bit exact.

use std::io::Cursor;

use image::{ImageFormat, Rgba32FImage};

use crate::error::PersistError;

pub fn encode_exr(pixels: &Rgba32FImage) -> Result<Vec<u8>, PersistError> {
    let mut cursor = Cursor::new(Vec::new());
    pixels
        .write_to(&mut cursor, ImageFormat::OpenExr)
        .map_err(|e| PersistError::EncodeError(e.to_string()))?;
    Ok(cursor.into_inner())
}

pub fn decode_exr(bytes: &[u8]) -> Result<Rgba32FImage, PersistError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::OpenExr)
        .map_err(|e| PersistError::DecodeError(e.to_string()))?;
    Ok(image.into_rgba32f())
}
