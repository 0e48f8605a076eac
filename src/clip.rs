use image::{Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Clip `target` to the opacity pattern of `mask`, in place.
///
/// Per target pixel (x, y):
/// - outside `mask`'s bounds, the pixel becomes fully transparent;
/// - where the mask pixel is exactly (0,0,0,0), the pixel becomes fully
///   transparent;
/// - where the mask is partially opaque and `blend_partial_alpha` is set,
///   the target keeps its RGB and takes the mask's alpha, unless the target
///   pixel is already fully transparent (it is left untouched, never
///   un-transparented);
/// - everywhere else the pixel is left untouched.
///
/// This stamps the mask's silhouette and anti-aliased edges onto the
/// target's alpha channel without touching its color.
pub fn clip_to_mask(mask: &RgbaImage, target: &mut RgbaImage, blend_partial_alpha: bool) {
    let (mask_w, mask_h) = mask.dimensions();

    for (x, y, px) in target.enumerate_pixels_mut() {
        if x >= mask_w || y >= mask_h {
            *px = TRANSPARENT;
            continue;
        }

        let m = *mask.get_pixel(x, y);
        if m == TRANSPARENT {
            *px = TRANSPARENT;
            continue;
        }

        if blend_partial_alpha && m.0[3] != 255 && px.0[3] != 0 {
            px.0[3] = m.0[3];
        }
    }
}
