//! Barcode recognition over uploaded images
//!
//! Only EAN/ISBN-13 symbology is recognized. The trait keeps the
//! recognizer swappable; the pipeline only depends on the contract.

pub mod ean13;

use crate::error::BarcodeError;
use crate::types::DecodedCode;
use std::collections::HashMap;

/// Trait for recognizing a barcode in a raw image payload
///
/// Pure function of the image bytes. `Ok(None)` means the image decoded
/// fine but carries no recognizable barcode; only an undecodable
/// payload is an error.
pub trait BarcodeDecoder: Send + Sync {
    fn decode(&self, image: &[u8]) -> Result<Option<DecodedCode>, BarcodeError>;
}

/// Decoder that scans horizontal lines of a grayscale rendition
pub struct EanImageDecoder {
    /// How many evenly spaced scanlines to sample
    rows_sampled: u32,
}

impl EanImageDecoder {
    pub fn new() -> Self {
        Self { rows_sampled: 32 }
    }
}

impl Default for EanImageDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BarcodeDecoder for EanImageDecoder {
    fn decode(&self, image: &[u8]) -> Result<Option<DecodedCode>, BarcodeError> {
        let img = image::load_from_memory(image)
            .map_err(|e| BarcodeError::InvalidImage(e.to_string()))?;
        let gray = img.to_luma8();
        let (width, height) = gray.dimensions();
        let pixels = gray.as_raw();

        let step = (height / self.rows_sampled).max(1) as usize;

        // Majority vote across scanlines; noisy rows can disagree
        let mut votes: HashMap<String, (u32, u32)> = HashMap::new();
        let mut hits = 0u32;
        for y in (0..height as usize).step_by(step) {
            let row = &pixels[y * width as usize..(y + 1) * width as usize];
            if let Some(code) = ean13::decode_row(row) {
                hits += 1;
                let entry = votes.entry(code).or_insert((0, y as u32));
                entry.0 += 1;
            }
        }

        let Some((digits, (count, row))) = votes.into_iter().max_by_key(|(_, (count, _))| *count)
        else {
            return Ok(None);
        };

        tracing::debug!(code = %digits, votes = count, sampled_hits = hits, "Recognized EAN-13");

        Ok(Some(DecodedCode {
            digits,
            confidence: count as f32 / hits as f32,
            row,
        }))
    }
}
