//! Image resource loading.
//!
//! Snapshots persist images by locator (`src`); rebuilding a snapshot loads
//! each locator back into an [`ImageResource`] through an injected
//! [`ImageLoader`]. The host supplies a network-backed loader; the built-in
//! [`DataUriLoader`] handles self-contained `data:` locators.

use crate::api::BoxFuture;
use thiserror::Error;

/// Errors raised while loading an image resource.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("unsupported image source: {0}")]
    Unsupported(String),
    #[error("failed to decode image data: {0}")]
    Decode(String),
}

/// Image format of a loaded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// A loaded image: its locator plus whatever the loader could decode.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    /// The locator this resource was loaded from. Persisted as the image
    /// node's `src` attribute when the layer is serialized.
    pub src: String,
    /// Detected format, if the loader could sniff it.
    pub format: Option<ImageFormat>,
    /// Pixel dimensions, if the loader could decode them.
    pub dimensions: Option<(u32, u32)>,
    /// Raw image bytes, if the loader materialized them.
    pub bytes: Option<Vec<u8>>,
}

impl ImageResource {
    /// A resource known only by its locator (e.g. a remote URL the renderer
    /// will fetch itself).
    pub fn from_src(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            format: None,
            dimensions: None,
            bytes: None,
        }
    }
}

/// Loads image resources by locator.
pub trait ImageLoader {
    fn load(&self, src: &str) -> BoxFuture<'_, Result<ImageResource, ImageLoadError>>;
}

/// Loader for self-contained `data:<mime>;base64,<payload>` locators.
///
/// Decodes the payload, sniffs the format from magic bytes, and reads PNG
/// dimensions from the IHDR chunk. Anything that is not a data URI is
/// rejected; remote locators belong to the host's loader.
pub struct DataUriLoader;

impl ImageLoader for DataUriLoader {
    fn load(&self, src: &str) -> BoxFuture<'_, Result<ImageResource, ImageLoadError>> {
        let src = src.to_string();
        Box::pin(async move {
            let rest = src
                .strip_prefix("data:")
                .ok_or_else(|| ImageLoadError::Unsupported(src.clone()))?;
            let (_, payload) = rest
                .split_once(";base64,")
                .ok_or_else(|| ImageLoadError::Unsupported(src.clone()))?;

            use base64::{engine::general_purpose::STANDARD, Engine};
            let bytes = STANDARD
                .decode(payload)
                .map_err(|e| ImageLoadError::Decode(e.to_string()))?;

            let format = ImageFormat::from_magic_bytes(&bytes);
            let dimensions = match format {
                Some(ImageFormat::Png) => png_dimensions(&bytes),
                _ => None,
            };

            Ok(ImageResource {
                src,
                format,
                dimensions,
                bytes: Some(bytes),
            })
        })
    }
}

/// Read width/height from a PNG IHDR chunk.
///
/// IHDR is required to be the first chunk: width and height are big-endian
/// u32s at byte offsets 16 and 20.
fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 24 || &data[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::block_on;

    /// 1x1 transparent PNG.
    fn tiny_png() -> Vec<u8> {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        // IHDR chunk: length 13, type, 1x1, bit depth 8, color type 6
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&tiny_png()),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"no"), None);
    }

    #[test]
    fn test_data_uri_load() {
        use base64::{engine::general_purpose::STANDARD, Engine};

        let png = tiny_png();
        let src = format!("data:image/png;base64,{}", STANDARD.encode(&png));

        let resource = block_on(DataUriLoader.load(&src)).unwrap();
        assert_eq!(resource.format, Some(ImageFormat::Png));
        assert_eq!(resource.dimensions, Some((1, 1)));
        assert_eq!(resource.bytes.as_deref(), Some(png.as_slice()));
        assert_eq!(resource.src, src);
    }

    #[test]
    fn test_non_data_uri_rejected() {
        let result = block_on(DataUriLoader.load("https://example.com/a.png"));
        assert!(matches!(result, Err(ImageLoadError::Unsupported(_))));
    }

    #[test]
    fn test_bad_base64_rejected() {
        let result = block_on(DataUriLoader.load("data:image/png;base64,!!!"));
        assert!(matches!(result, Err(ImageLoadError::Decode(_))));
    }
}
