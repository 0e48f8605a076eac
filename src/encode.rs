use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context as _;
use image::RgbaImage;

use crate::error::{BannerError, BannerResult};

/// Output resolution metadata, written as the PNG pHYs chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub ppi_x: f32,
    pub ppi_y: f32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            ppi_x: 96.0,
            ppi_y: 96.0,
        }
    }
}

/// Serialize `image` as an RGBA8 PNG.
///
/// `quality` is the 1-100 scale where higher means better quality / less
/// compression; it selects the encoder's compression level (PNG is
/// lossless, so pixels are identical either way).
pub fn write_png(
    path: &Path,
    image: &RgbaImage,
    resolution: Resolution,
    quality: u8,
) -> BannerResult<()> {
    let compression = compression_for_quality(quality)?;

    let file = File::create(path)
        .with_context(|| format!("create output '{}'", path.display()))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(compression);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppi_to_pixels_per_meter(resolution.ppi_x),
        yppu: ppi_to_pixels_per_meter(resolution.ppi_y),
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| BannerError::image(format!("write png header: {e}")))?;
    writer
        .write_image_data(image.as_raw())
        .map_err(|e| BannerError::image(format!("write png data: {e}")))?;
    writer
        .finish()
        .map_err(|e| BannerError::image(format!("finish png '{}': {e}", path.display())))?;
    Ok(())
}

/// Read the resolution (pHYs chunk) out of encoded PNG bytes, if present
/// with a physical unit.
pub fn read_png_resolution(bytes: &[u8]) -> Option<Resolution> {
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().ok()?;
    let dims = reader.info().pixel_dims?;
    if !matches!(dims.unit, png::Unit::Meter) {
        return None;
    }
    Some(Resolution {
        ppi_x: pixels_per_meter_to_ppi(dims.xppu),
        ppi_y: pixels_per_meter_to_ppi(dims.yppu),
    })
}

fn ppi_to_pixels_per_meter(ppi: f32) -> u32 {
    (f64::from(ppi) * 10_000.0 / 254.0).round() as u32
}

fn pixels_per_meter_to_ppi(ppu: u32) -> f32 {
    (f64::from(ppu) * 254.0 / 10_000.0) as f32
}

pub(crate) fn compression_for_quality(quality: u8) -> BannerResult<png::Compression> {
    match quality {
        1..=33 => Ok(png::Compression::Best),
        34..=66 => Ok(png::Compression::Default),
        67..=100 => Ok(png::Compression::Fast),
        _ => Err(BannerError::validation(format!(
            "png quality must be in 1-100, got {quality}"
        ))),
    }
}
