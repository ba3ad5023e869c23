//! Decoded barcode and catalog metadata types

use serde::{Deserialize, Serialize};

/// A barcode recognized in an image
///
/// Produced by the decoder and consumed immediately by the resolver;
/// never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecodedCode {
    /// The recognized digits (EAN-13, check digit verified)
    pub digits: String,

    /// Fraction of successfully decoded scanlines that agreed on `digits`
    pub confidence: f32,

    /// Image row of the first successful scanline
    pub row: u32,
}

/// Book metadata resolved from the external catalog
///
/// Every field is fully populated: the resolver applies placeholder
/// defaults once, at the boundary, so nothing downstream ever sees a
/// missing title or author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookMetadata {
    /// Book title, or "Unknown Title"
    pub title: String,

    /// Authors joined with ", ", or "Unknown Author"
    pub author: String,

    /// Normalized ISBN the metadata was resolved for
    pub isbn: String,

    /// Cover image URL, empty when the catalog has none
    pub cover_url: String,
}

impl BookMetadata {
    /// Placeholder used when the catalog omits the title
    pub const UNKNOWN_TITLE: &'static str = "Unknown Title";

    /// Placeholder used when the catalog omits the author list
    pub const UNKNOWN_AUTHOR: &'static str = "Unknown Author";
}

/// Normalize a raw ISBN string to bare digits
///
/// Strips whitespace and hyphens so duplicate checks reduce to exact
/// string equality. Happens once, at pipeline entry.
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}
