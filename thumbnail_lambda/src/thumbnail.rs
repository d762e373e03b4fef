use std::io::Cursor;

use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat, ImageOutputFormat};

use crate::error::ThumbnailError;

/// Settings for one thumbnail pipeline, built once at cold start.
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Neither side of a thumbnail exceeds this many pixels.
    pub max_dimension: u32,
    /// Key prefix thumbnails are written under. Keys already under it are skipped.
    pub prefix: String,
    /// Used when the source format has no encoder.
    pub fallback_format: ImageFormat,
    pub jpeg_quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_dimension: 200,
            prefix: "thumbnails/".to_string(),
            fallback_format: ImageFormat::Jpeg,
            jpeg_quality: 85,
        }
    }
}

/// An encoded thumbnail.
#[derive(Debug)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// The source format could not be re-encoded and `fallback_format` was used.
    pub fallback: bool,
}

impl Thumbnail {
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Fits `(width, height)` inside a `max` x `max` box, keeping the aspect
/// ratio. Never upscales.
pub fn bounded_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max {
        return (width, height);
    }
    let scale = f64::from(max) / f64::from(longest);
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).max(1);
    (fit(width), fit(height))
}

/// Decodes `bytes`, scales the image into the configured box in one pass and
/// re-encodes it.
pub fn generate(bytes: &[u8], config: &ThumbnailConfig) -> Result<Thumbnail, ThumbnailError> {
    let format = image::guess_format(bytes).map_err(ThumbnailError::Decode)?;
    let img = image::load_from_memory_with_format(bytes, format).map_err(ThumbnailError::Decode)?;

    let (width, height) = bounded_dimensions(img.width(), img.height(), config.max_dimension);
    let resized = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    encode(&resized, format, config)
}

fn encode(
    img: &DynamicImage,
    format: ImageFormat,
    config: &ThumbnailConfig,
) -> Result<Thumbnail, ThumbnailError> {
    let (format, fallback) = match output_format(format, config) {
        ImageOutputFormat::Unsupported(_) => (config.fallback_format, true),
        _ => (format, false),
    };

    let mut out = Cursor::new(Vec::new());
    match output_format(format, config) {
        ImageOutputFormat::Jpeg(quality) => jpeg_compatible(img)
            .write_to(&mut out, ImageOutputFormat::Jpeg(quality))
            .map_err(ThumbnailError::Encode)?,
        output => img.write_to(&mut out, output).map_err(ThumbnailError::Encode)?,
    }

    Ok(Thumbnail {
        bytes: out.into_inner(),
        format,
        width: img.width(),
        height: img.height(),
        fallback,
    })
}

fn output_format(format: ImageFormat, config: &ThumbnailConfig) -> ImageOutputFormat {
    match format {
        ImageFormat::Jpeg => ImageOutputFormat::Jpeg(config.jpeg_quality),
        other => other.into(),
    }
}

/// JPEG has no alpha channel and only 8-bit samples.
fn jpeg_compatible(img: &DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img.clone(),
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            DynamicImage::ImageLuma8(img.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}
