use crate::model::Transform;
use image::{Rgba, RgbaImage};

/// Nearest-neighbor scale of `src` to `dw` x `dh`.
pub fn scale_nearest(src: &RgbaImage, dw: u32, dh: u32) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    let mut out = RgbaImage::new(dw, dh);
    if sw == 0 || sh == 0 {
        return out;
    }
    for y in 0..dh {
        let sy = (y as u64 * sh as u64 / dh as u64) as u32;
        for x in 0..dw {
            let sx = (x as u64 * sw as u64 / dw as u64) as u32;
            out.put_pixel(x, y, *src.get_pixel(sx, sy));
        }
    }
    out
}

/// Extract the source region `(fx, fy, fw, fh)` (pixels, fractional allowed)
/// into a `dw` x `dh` block, averaging the source pixels each destination
/// pixel covers. With integer scale factors this degenerates to an exact
/// per-pixel copy.
pub fn extract_box(src: &RgbaImage, fx: f32, fy: f32, fw: f32, fh: f32, dw: u32, dh: u32) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    let mut out = RgbaImage::new(dw, dh);
    if dw == 0 || dh == 0 || sw == 0 || sh == 0 {
        return out;
    }
    for dy in 0..dh {
        let w0 = fy + fh * dy as f32 / dh as f32;
        let w1 = fy + fh * (dy + 1) as f32 / dh as f32;
        let y0 = (w0.floor().max(0.0) as u32).min(sh - 1);
        let y1 = (w1.ceil().max(1.0) as u32).clamp(y0 + 1, sh);
        for dx in 0..dw {
            let v0 = fx + fw * dx as f32 / dw as f32;
            let v1 = fx + fw * (dx + 1) as f32 / dw as f32;
            let x0 = (v0.floor().max(0.0) as u32).min(sw - 1);
            let x1 = (v1.ceil().max(1.0) as u32).clamp(x0 + 1, sw);
            let mut acc = [0u64; 4];
            let mut n = 0u64;
            for sy in y0..y1 {
                for sx in x0..x1 {
                    let p = src.get_pixel(sx, sy);
                    for c in 0..4 {
                        acc[c] += p[c] as u64;
                    }
                    n += 1;
                }
            }
            let px = Rgba([
                (acc[0] / n) as u8,
                (acc[1] / n) as u8,
                (acc[2] / n) as u8,
                (acc[3] / n) as u8,
            ]);
            out.put_pixel(dx, dy, px);
        }
    }
    out
}

/// Apply `transform` to `src`: horizontal mirror maps (x, y) to
/// (w-1-x, y), vertical to (x, h-1-y), both composes the two (a 180 degree
/// rotation). Channels are copied verbatim per pixel.
pub fn transformed(src: &RgbaImage, transform: Transform) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = match transform {
                Transform::Identity => (x, y),
                Transform::FlipHorizontal => (w - 1 - x, y),
                Transform::FlipVertical => (x, h - 1 - y),
                Transform::FlipBoth => (w - 1 - x, h - 1 - y),
            };
            out.put_pixel(dx, dy, *src.get_pixel(x, y));
        }
    }
    out
}

/// Copy `src` over `canvas` with its top-left at (dx, dy). Pixels falling
/// outside the canvas are dropped.
pub fn blit(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    for yy in 0..sh {
        for xx in 0..sw {
            if dx + xx < cw && dy + yy < ch {
                canvas.put_pixel(dx + xx, dy + yy, *src.get_pixel(xx, yy));
            }
        }
    }
}
