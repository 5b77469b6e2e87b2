//! Codec and resampler capability seam
//!
//! The batch pipeline only ever talks to images through [`ImageCodec`] and
//! [`Resampler`], so the scheduling core can be tested against a fake codec
//! that fabricates buffers of known dimensions.

use std::fs::File;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::error::{Result, ResizeBenchError};

/// Pixel dimensions of a raster image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Target dimensions for a scale factor, truncated toward zero.
    ///
    /// Returns `None` when either scaled component would fall below one
    /// pixel; a zero-area image cannot be created.
    pub fn scaled(self, scale: f64) -> Option<Dimensions> {
        let width = f64::from(self.width) * scale;
        let height = f64::from(self.height) * scale;

        if !width.is_finite() || !height.is_finite() {
            return None;
        }
        if width < 1.0 || height < 1.0 {
            return None;
        }
        if width >= f64::from(u32::MAX) || height >= f64::from(u32::MAX) {
            return None;
        }

        Some(Dimensions {
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Opaque in-memory pixel data with known dimensions
///
/// Owned exclusively by whichever pipeline stage currently holds it; the
/// decode -> resample -> encode handoff never aliases a buffer across tasks.
pub struct RasterBuffer {
    image: DynamicImage,
}

impl RasterBuffer {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.image.width(), self.image.height())
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Decodes source files into raster buffers and encodes buffers to disk
/// in the fixed output format.
pub trait ImageCodec: Send + Sync {
    /// Read just enough of the file to learn its dimensions
    fn probe(&self, path: &Path) -> Result<Dimensions>;

    /// Decode the full image into memory
    fn decode(&self, path: &Path) -> Result<RasterBuffer>;

    /// Persist a buffer to `path` in the output encoding
    fn encode(&self, buffer: &RasterBuffer, path: &Path) -> Result<()>;
}

/// Produces a new raster buffer at the target dimensions via interpolation.
/// Stateless and safe to invoke concurrently on independent buffers.
pub trait Resampler: Send + Sync {
    fn resample(&self, source: &RasterBuffer, target: Dimensions) -> RasterBuffer;
}

/// Production codec backed by the `image` crate, writing JPEG output
pub struct JpegCodec {
    quality: u8,
}

impl JpegCodec {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self::new(90)
    }
}

impl ImageCodec for JpegCodec {
    fn probe(&self, path: &Path) -> Result<Dimensions> {
        // Header-only read, the pixel data stays on disk
        let (width, height) = image::image_dimensions(path)
            .map_err(|e| ResizeBenchError::decode(e.to_string(), path.to_path_buf()))?;
        Ok(Dimensions::new(width, height))
    }

    fn decode(&self, path: &Path) -> Result<RasterBuffer> {
        let image = image::open(path)
            .map_err(|e| ResizeBenchError::decode(e.to_string(), path.to_path_buf()))?;
        Ok(RasterBuffer::new(image))
    }

    fn encode(&self, buffer: &RasterBuffer, path: &Path) -> Result<()> {
        let mut output = File::create(path)
            .map_err(|e| ResizeBenchError::write(e.to_string(), path.to_path_buf()))?;

        let encoder = JpegEncoder::new_with_quality(&mut output, self.quality);
        buffer
            .as_image()
            // JPEG has no alpha channel
            .to_rgb8()
            .write_with_encoder(encoder)
            .map_err(|e| ResizeBenchError::write(e.to_string(), path.to_path_buf()))?;

        Ok(())
    }
}

/// High-quality whole-image rescale
///
/// The full source rectangle is mapped onto the full destination rectangle
/// (`resize_exact`), so every destination pixel is covered and no background
/// fill is ever needed.
pub struct LanczosResampler {
    filter: image::imageops::FilterType,
}

impl LanczosResampler {
    pub fn new() -> Self {
        Self {
            filter: image::imageops::FilterType::Lanczos3,
        }
    }

    pub fn with_filter(filter: image::imageops::FilterType) -> Self {
        Self { filter }
    }
}

impl Default for LanczosResampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Resampler for LanczosResampler {
    fn resample(&self, source: &RasterBuffer, target: Dimensions) -> RasterBuffer {
        let resized = source
            .as_image()
            .resize_exact(target.width, target.height, self.filter);
        RasterBuffer::new(resized)
    }
}
