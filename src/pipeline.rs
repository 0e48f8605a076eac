use std::path::Path;

use image::RgbaImage;
use tracing::debug;

use crate::{
    assets::AssetSource,
    catalog::RecordSet,
    clip::clip_to_mask,
    composite::{Layer, composite, cover_scale},
    encode::{Resolution, write_png},
    error::BannerResult,
    recolor::{DEFAULT_IGNORE, recolor_in_place},
};

/// PNG output quality on the 1-100 scale (higher = less compression).
pub const PNG_QUALITY: u8 = 90;

/// The flag staff is scaled to cover at least this box before compositing.
const STAFF_COVER_BOX: (u32, u32) = (422, 616);

/// Final layer offsets, back to front.
const STAFF_OFFSET: (i64, i64) = (38, 0);
const OVERLAY_OFFSET: (i64, i64) = (12, 42);
const DECAL_OFFSET: (i64, i64) = (48, 42);
const GONFALON_OFFSET: (i64, i64) = (48, 42);

/// Horizontal shift applied to the silhouette when it masks the overlay.
const OVERLAY_MASK_SHIFT_X: i64 = 35;

/// A rendered banner plus the resolution metadata for its PNG.
#[derive(Clone, Debug)]
pub struct Banner {
    pub image: RgbaImage,
    pub resolution: Resolution,
}

/// The player-selected component ids for one banner.
#[derive(Clone, Copy, Debug)]
pub struct BannerRequest {
    pub decal_id: u32,
    pub decal_color_id: u32,
    pub decal_background_color_id: u32,
    pub gonfalon_id: u32,
    pub gonfalon_color_id: u32,
    pub gonfalon_detail_id: u32,
    pub gonfalon_detail_color_id: u32,
}

/// Render the banner for `request`, strictly sequentially.
///
/// Any failure (lookup miss, fetch failure, malformed record) aborts the
/// whole pipeline; there is no partial result.
pub fn render_banner(
    assets: &mut dyn AssetSource,
    request: &BannerRequest,
) -> BannerResult<Banner> {
    let silhouette = assets.gonfalon_image(request.gonfalon_id)?;
    let staff = assets.flag_staff_image()?;
    let mut overlay = assets.flag_overlay_image()?;

    // The final canvas keeps the staff's pre-scale dimensions; the scaled
    // staff may exceed them and is cropped during the final composite.
    let (canvas_w, canvas_h) = staff.image.dimensions();
    let scaled_staff = cover_scale(&staff.image, STAFF_COVER_BOX.0, STAFF_COVER_BOX.1);
    debug!(
        canvas_w,
        canvas_h,
        scaled_w = scaled_staff.width(),
        scaled_h = scaled_staff.height(),
        "staff scaled to cover box"
    );

    // The overlay is clipped against the silhouette shifted right, rendered
    // at the overlay's own size.
    let overlay_mask = composite(
        &[Layer::new(&silhouette, OVERLAY_MASK_SHIFT_X, 0)],
        overlay.width(),
        overlay.height(),
    );
    clip_to_mask(&overlay_mask, &mut overlay, true);

    let decal = build_decal(assets, request, &silhouette)?;
    let gonfalon = build_gonfalon(assets, request, silhouette)?;

    debug!("compositing final banner");
    let image = composite(
        &[
            Layer::new(&scaled_staff, STAFF_OFFSET.0, STAFF_OFFSET.1),
            Layer::new(&overlay, OVERLAY_OFFSET.0, OVERLAY_OFFSET.1),
            Layer::new(&decal, DECAL_OFFSET.0, DECAL_OFFSET.1),
            Layer::new(&gonfalon, GONFALON_OFFSET.0, GONFALON_OFFSET.1),
        ],
        canvas_w,
        canvas_h,
    );
    Ok(Banner {
        image,
        resolution: staff.resolution.unwrap_or_default(),
    })
}

/// Render the banner and serialize it to `out_path` as a PNG.
pub fn render_banner_to_file(
    assets: &mut dyn AssetSource,
    request: &BannerRequest,
    out_path: &Path,
) -> BannerResult<()> {
    let banner = render_banner(assets, request)?;
    write_png(out_path, &banner.image, banner.resolution, PNG_QUALITY)
}

/// Recolored decal art composited and clipped to the raw silhouette.
fn build_decal(
    assets: &mut dyn AssetSource,
    request: &BannerRequest,
    silhouette: &RgbaImage,
) -> BannerResult<RgbaImage> {
    let mut art = assets.decal_images(request.decal_id)?;
    let primary = assets.color(RecordSet::DecalPrimaryColors, request.decal_color_id)?;
    let secondary = assets.color(
        RecordSet::DecalSecondaryColors,
        request.decal_background_color_id,
    )?;

    recolor_in_place(&mut art.foreground, primary, &DEFAULT_IGNORE);
    recolor_in_place(&mut art.background, secondary, &DEFAULT_IGNORE);

    let width = art.background.width().max(art.foreground.width());
    let height = art.background.height().max(art.foreground.height());
    let mut decal = composite(
        &[Layer::new(&art.background, 0, 0), Layer::new(&art.foreground, 0, 0)],
        width,
        height,
    );
    clip_to_mask(silhouette, &mut decal, true);
    Ok(decal)
}

/// Recolored detail clipped to the silhouette, then the recolored
/// silhouette composited over it.
fn build_gonfalon(
    assets: &mut dyn AssetSource,
    request: &BannerRequest,
    mut silhouette: RgbaImage,
) -> BannerResult<RgbaImage> {
    let mut detail = assets.gonfalon_detail_image(request.gonfalon_detail_id)?;
    let detail_color = assets.color(
        RecordSet::GonfalonDetailColors,
        request.gonfalon_detail_color_id,
    )?;
    recolor_in_place(&mut detail, detail_color, &DEFAULT_IGNORE);
    clip_to_mask(&silhouette, &mut detail, true);

    let gonfalon_color = assets.color(RecordSet::GonfalonColors, request.gonfalon_color_id)?;
    recolor_in_place(&mut silhouette, gonfalon_color, &DEFAULT_IGNORE);

    let width = silhouette.width().max(detail.width());
    let height = silhouette.height().max(detail.height());
    Ok(composite(&[Layer::new(&detail, 0, 0), Layer::new(&silhouette, 0, 0)], width, height))
}
