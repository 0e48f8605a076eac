use image::{Rgba, RgbaImage};

/// The pipeline-wide ignore set: fully transparent pixels are never recolored,
/// which keeps anti-aliased edges and empty regions intact.
pub const DEFAULT_IGNORE: [Rgba<u8>; 1] = [Rgba([0, 0, 0, 0])];

/// Replace the RGB of every pixel not in `ignore` with `target`'s RGB.
///
/// The pixel's own alpha is always preserved; `target`'s alpha is never
/// applied. Color definitions are pure hue sources.
pub fn recolor_in_place(image: &mut RgbaImage, target: Rgba<u8>, ignore: &[Rgba<u8>]) {
    let Rgba([r, g, b, _]) = target;
    for px in image.pixels_mut() {
        if ignore.contains(px) {
            continue;
        }
        let a = px.0[3];
        *px = Rgba([r, g, b, a]);
    }
}
