//! PNG export format
//!
//! Every texture leaves the tool as a straight-alpha RGBA PNG of exactly the
//! configured box size, encoded with the `image` crate.

use image::{ImageBuffer, ImageEncoder, RgbaImage};
use wfsprite_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::{BitmapData, BitmapFormat},
};

/// Encode bitmap data to PNG format.
///
/// RGBA8 is written as is; Gray8 is expanded to opaque gray.
pub fn encode_bitmap_to_png(bitmap: &BitmapData) -> Result<Vec<u8>> {
    let pixels = bitmap.width as usize * bitmap.height as usize;
    let expected_size = match bitmap.format {
        BitmapFormat::Rgba8 => pixels * 4,
        BitmapFormat::Gray8 => pixels,
    };

    if bitmap.data.len() < expected_size {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer too small: expected {} bytes for {}x{} {:?}, got {}",
            expected_size,
            bitmap.width,
            bitmap.height,
            bitmap.format,
            bitmap.data.len()
        ))
        .into());
    }

    let rgba_data = match bitmap.format {
        BitmapFormat::Rgba8 => bitmap.data[..expected_size].to_vec(),
        BitmapFormat::Gray8 => {
            let mut rgba_data = Vec::with_capacity(pixels * 4);
            for &gray in &bitmap.data[..expected_size] {
                rgba_data.extend_from_slice(&[gray, gray, gray, 255]);
            }
            rgba_data
        },
    };

    let img: RgbaImage = ImageBuffer::from_raw(bitmap.width, bitmap.height, rgba_data)
        .ok_or_else(|| ExportError::EncodingFailed("Failed to create image buffer".into()))?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(img.as_raw(), bitmap.width, bitmap.height, image::ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// Writes textures as PNG files
#[derive(Debug, Default, Clone, Copy)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        encode_bitmap_to_png(bitmap)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn test_png_exporter_names() {
        let exporter = PngExporter::new();
        assert_eq!(exporter.name(), "png");
        assert_eq!(exporter.extension(), "png");
        assert_eq!(exporter.mime_type(), "image/png");
    }

    #[test]
    fn test_rgba_pixels_survive_encoding() {
        let bitmap = BitmapData {
            width: 2,
            height: 2,
            format: BitmapFormat::Rgba8,
            data: vec![
                255, 0, 0, 255, // red
                0, 255, 0, 128, // half green
                0, 0, 0, 0, // transparent
                255, 255, 255, 255, // white
            ],
        };

        let png_data = PngExporter::new().export(&bitmap).unwrap();
        assert_eq!(&png_data[0..8], &PNG_MAGIC);

        let decoded = image::load_from_memory_with_format(&png_data, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.as_raw(), &bitmap.data);
    }

    #[test]
    fn test_grayscale_becomes_opaque() {
        let bitmap = BitmapData {
            width: 2,
            height: 1,
            format: BitmapFormat::Gray8,
            data: vec![0, 200],
        };
        let png_data = encode_bitmap_to_png(&bitmap).unwrap();
        let decoded = image::load_from_memory(&png_data).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), &vec![0, 0, 0, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let bitmap = BitmapData {
            width: 4,
            height: 4,
            format: BitmapFormat::Rgba8,
            data: vec![0; 10],
        };
        let err = encode_bitmap_to_png(&bitmap).unwrap_err();
        assert!(err.to_string().contains("Buffer too small"));
    }
}
