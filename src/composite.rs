use image::{Rgba, RgbaImage, imageops};

/// One positioned layer in a back-to-front draw sequence.
#[derive(Clone, Copy, Debug)]
pub struct Layer<'a> {
    pub image: &'a RgbaImage,
    pub x: i64,
    pub y: i64,
}

impl<'a> Layer<'a> {
    pub fn new(image: &'a RgbaImage, x: i64, y: i64) -> Self {
        Self { image, x, y }
    }
}

/// Draw `layers` back-to-front onto a transparent canvas of the given size.
///
/// Each layer is drawn at its own pixel dimensions at its (x, y) offset with
/// straight-alpha source-over blending; a later layer visually sits on top.
/// Pixels falling outside the canvas are cropped by the canvas bounds.
/// Input layers are not mutated.
pub fn composite(layers: &[Layer<'_>], width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    for layer in layers {
        draw_over(&mut canvas, layer);
    }
    canvas
}

fn draw_over(canvas: &mut RgbaImage, layer: &Layer<'_>) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    for (x, y, src) in layer.image.enumerate_pixels() {
        let cx = layer.x + i64::from(x);
        let cy = layer.y + i64::from(y);
        if cx < 0 || cy < 0 || cx >= i64::from(canvas_w) || cy >= i64::from(canvas_h) {
            continue;
        }
        let (cx, cy) = (cx as u32, cy as u32);
        let dst = *canvas.get_pixel(cx, cy);
        canvas.put_pixel(cx, cy, over(dst, *src));
    }
}

/// Source-over for straight (non-premultiplied) RGBA8.
fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src.0[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst.0[3]);
    let dst_w = (da * (255 - sa) + 127) / 255;
    let out_a = sa + dst_w;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (u32::from(src.0[i]) * sa + u32::from(dst.0[i]) * dst_w + out_a / 2) / out_a;
        out[i] = c as u8;
    }
    out[3] = out_a as u8;
    Rgba(out)
}

/// Scale `image` proportionally so it covers at least `box_w` x `box_h`.
///
/// The factor is the max of the two axis ratios, so the result may exceed
/// the box on one axis; downstream compositing crops via canvas bounds.
pub fn cover_scale(image: &RgbaImage, box_w: u32, box_h: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }

    let scale = (f64::from(box_w) / f64::from(w)).max(f64::from(box_h) / f64::from(h));
    let new_w = (f64::from(w) * scale).round().max(1.0) as u32;
    let new_h = (f64::from(h) * scale).round().max(1.0) as u32;
    imageops::resize(image, new_w, new_h, imageops::FilterType::Triangle)
}
