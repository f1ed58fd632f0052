use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use thiserror::Error;

/// Largest screenshot accepted for analysis.
pub const MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Failed to read image: {0}")]
    Read(#[from] std::io::Error),
    #[error("Unsupported image format ({0}). Supported formats: PNG, JPG, WebP")]
    UnsupportedFormat(String),
    #[error("File size must be less than 20MB (got {})", format_file_size(*.0))]
    TooLarge(u64),
}

/// A validated screenshot ready to be sent to a vision model.
#[derive(Debug, Clone)]
pub struct ScreenshotImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl ScreenshotImage {
    pub fn mime_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            _ => "application/octet-stream",
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URL embedding the image, as accepted by chat-completions APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.to_base64())
    }
}

/// Check size and format of in-memory image bytes.
pub fn validate_image_bytes(bytes: Vec<u8>) -> Result<ScreenshotImage, ImageLoadError> {
    let size = bytes.len() as u64;
    if size > MAX_IMAGE_BYTES {
        return Err(ImageLoadError::TooLarge(size));
    }

    let format = image::guess_format(&bytes)
        .map_err(|_| ImageLoadError::UnsupportedFormat("unrecognized data".to_string()))?;
    match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP => Ok(ScreenshotImage { bytes, format }),
        other => Err(ImageLoadError::UnsupportedFormat(format!("{other:?}"))),
    }
}

/// Read and validate a screenshot from disk. The size limit is checked before
/// the file is read.
pub fn load_screenshot(path: &Path) -> Result<ScreenshotImage, ImageLoadError> {
    if !path.exists() {
        return Err(ImageLoadError::NotFound(path.display().to_string()));
    }
    let size = fs::metadata(path)?.len();
    if size > MAX_IMAGE_BYTES {
        return Err(ImageLoadError::TooLarge(size));
    }
    validate_image_bytes(fs::read(path)?)
}

/// Human-readable byte count, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png_bytes() -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_screenshot(Path::new("/nonexistent/path/image.png"));
        assert!(matches!(result.unwrap_err(), ImageLoadError::NotFound(_)));
    }

    #[test]
    fn png_is_accepted_and_encoded_as_data_url() {
        let image = validate_image_bytes(png_bytes()).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert!(image.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn gif_is_rejected() {
        let err = validate_image_bytes(b"GIF89a\x01\x00\x01\x00".to_vec()).unwrap_err();
        assert!(matches!(err, ImageLoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn text_is_rejected() {
        let err = validate_image_bytes(b"hello world".to_vec()).unwrap_err();
        assert!(err.to_string().contains("Supported formats"));
    }

    #[test]
    fn oversized_input_is_rejected_before_sniffing() {
        let err = validate_image_bytes(vec![0u8; (MAX_IMAGE_BYTES + 1) as usize]).unwrap_err();
        assert!(matches!(err, ImageLoadError::TooLarge(_)));
        assert!(err.to_string().contains("20 MB"));
    }

    #[test]
    fn loads_screenshot_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shot.png");
        fs::write(&path, png_bytes()).unwrap();
        let image = load_screenshot(&path).unwrap();
        assert_eq!(image.format, ImageFormat::Png);
    }

    #[test]
    fn formats_file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(20 * 1024 * 1024), "20 MB");
    }
}
