//! Binary signature sniffing for fetched icon bodies.
//!
//! Servers routinely mislabel icons (`.ico` served as
//! `application/octet-stream`) or answer `200 OK` with an HTML error page at a
//! well-known icon path, so neither headers nor extensions are trusted. The
//! leading bytes are matched against known magic numbers instead.

use image::ImageFormat;
use std::io::Cursor;

/// Leading bytes inspected when sniffing; enough for every supported
/// signature.
pub const SNIFF_PREFIX_LEN: usize = 128;

/// What the leading bytes of a body look like.
///
/// `types` and `extensions` are empty when no signature matched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Content types implied by the signature, most specific first.
    pub types: Vec<String>,
    /// File extensions conventionally used for the format.
    pub extensions: Vec<String>,
    format: Option<ImageFormat>,
}

impl Signature {
    /// First content type, if any signature matched.
    #[must_use]
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    /// First extension, if any signature matched.
    #[must_use]
    pub fn primary_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }

    /// Whether the signature identifies image content with both a type and
    /// an extension.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.primary_extension().is_some()
            && self.primary_type().is_some_and(|t| t.contains("image"))
    }

    /// Image format behind the signature.
    #[must_use]
    pub const fn format(&self) -> Option<ImageFormat> {
        self.format
    }
}

/// Sniff the leading [`SNIFF_PREFIX_LEN`] bytes of `bytes`.
#[must_use]
pub fn sniff(bytes: &[u8]) -> Signature {
    let prefix = &bytes[..bytes.len().min(SNIFF_PREFIX_LEN)];
    let Ok(format) = image::guess_format(prefix) else {
        return Signature::default();
    };

    Signature {
        types: vec![format.to_mime_type().to_string()],
        extensions: format
            .extensions_str()
            .iter()
            .map(|ext| (*ext).to_string())
            .collect(),
        format: Some(format),
    }
}

/// Pixel dimensions from the image header, when a decoder for `format` is
/// compiled in and the header is readable.
#[must_use]
pub fn dimensions(bytes: &[u8], format: ImageFormat) -> Option<(u32, u32)> {
    image::ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .ok()
}
