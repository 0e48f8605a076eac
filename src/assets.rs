use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::{
    catalog::{Catalog, RecordSet},
    encode::{Resolution, read_png_resolution},
    error::{BannerError, BannerResult},
    fetch::AssetFetcher,
};

/// Fixed art served outside the catalog.
pub const FLAG_STAFF_PATH: &str = "/img/bannercreator/flag_staff.png";
pub const FLAG_OVERLAY_PATH: &str = "/img/bannercreator/flag_overlay.png";

/// Decal art: a foreground/background image pair.
#[derive(Clone, Debug)]
pub struct DecalArt {
    pub foreground: RgbaImage,
    pub background: RgbaImage,
}

/// Flag staff art plus the resolution its source bytes carried, if any.
/// The output PNG inherits this resolution.
#[derive(Clone, Debug)]
pub struct FlagStaff {
    pub image: RgbaImage,
    pub resolution: Option<Resolution>,
}

/// Resolver seam between the pipeline and the catalog/content host.
pub trait AssetSource {
    fn gonfalon_image(&mut self, id: u32) -> BannerResult<RgbaImage>;
    fn decal_images(&mut self, id: u32) -> BannerResult<DecalArt>;
    fn gonfalon_detail_image(&mut self, id: u32) -> BannerResult<RgbaImage>;
    fn color(&mut self, set: RecordSet, id: u32) -> BannerResult<Rgba<u8>>;
    fn flag_staff_image(&mut self) -> BannerResult<FlagStaff>;
    fn flag_overlay_image(&mut self) -> BannerResult<RgbaImage>;
}

/// Decode encoded image bytes (PNG on the wire) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> BannerResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// The production resolver: catalog lookup, HTTP fetch, decode.
pub struct RemoteAssets {
    catalog: Catalog,
    fetcher: AssetFetcher,
}

impl RemoteAssets {
    pub fn new(catalog: Catalog, fetcher: AssetFetcher) -> Self {
        Self { catalog, fetcher }
    }

    fn fetch_image(&self, path: &str) -> BannerResult<RgbaImage> {
        let bytes = self.fetcher.fetch(path)?;
        decode_image(&bytes)
    }
}

impl AssetSource for RemoteAssets {
    fn gonfalon_image(&mut self, id: u32) -> BannerResult<RgbaImage> {
        let record = self.catalog.art_record(RecordSet::Gonfalons, id)?;
        self.fetch_image(&record.foreground_image_path)
    }

    fn decal_images(&mut self, id: u32) -> BannerResult<DecalArt> {
        let record = self.catalog.art_record(RecordSet::Decals, id)?;
        let background_path = record.background_image_path.as_deref().ok_or_else(|| {
            BannerError::database(format!("decal record {id} is missing backgroundImagePath"))
        })?;

        Ok(DecalArt {
            foreground: self.fetch_image(&record.foreground_image_path)?,
            background: self.fetch_image(background_path)?,
        })
    }

    fn gonfalon_detail_image(&mut self, id: u32) -> BannerResult<RgbaImage> {
        let record = self.catalog.art_record(RecordSet::GonfalonDetails, id)?;
        self.fetch_image(&record.foreground_image_path)
    }

    fn color(&mut self, set: RecordSet, id: u32) -> BannerResult<Rgba<u8>> {
        self.catalog.color(set, id)
    }

    fn flag_staff_image(&mut self) -> BannerResult<FlagStaff> {
        let bytes = self.fetcher.fetch(FLAG_STAFF_PATH)?;
        Ok(FlagStaff {
            resolution: read_png_resolution(&bytes),
            image: decode_image(&bytes)?,
        })
    }

    fn flag_overlay_image(&mut self) -> BannerResult<RgbaImage> {
        self.fetch_image(FLAG_OVERLAY_PATH)
    }
}
