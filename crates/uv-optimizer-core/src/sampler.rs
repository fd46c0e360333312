use crate::model::{Sample, UvRect};
use crate::raster;
use image::RgbaImage;

/// Extract the pixel block the face's UV rectangle covers on its source
/// texture.
///
/// `uv_space` is the texture-space unit size of the UV coordinate system; the
/// UV rectangle is scaled by `(texture_w / uv_space_w, texture_h /
/// uv_space_h)` into source pixels. The signed UV extents are recorded on the
/// sample so mirrored mappings survive repacking.
///
/// Returns the invalid marker when the UV rectangle has zero extent on either
/// axis or the scaled region rounds below one pixel, and the degenerate 1x1
/// marker when the share of pixels with alpha > 0 falls below
/// `ignore_fraction`.
pub fn sample_face(
    texture_index: usize,
    texture: &RgbaImage,
    uv_space: (f32, f32),
    uv: &UvRect,
    ignore_fraction: f32,
) -> Sample {
    let (tw, th) = texture.dimensions();
    let scale_x = tw as f32 / uv_space.0;
    let scale_y = th as f32 / uv_space.1;

    let width = uv.width();
    let height = uv.height();
    if width == 0.0 || height == 0.0 {
        return Sample::invalid(texture_index, scale_x, scale_y);
    }

    let px_w = (width * scale_x).abs().round() as u32;
    let px_h = (height * scale_y).abs().round() as u32;
    if px_w < 1 || px_h < 1 {
        return Sample::invalid(texture_index, scale_x, scale_y);
    }

    let fx = uv.x1.min(uv.x2) * scale_x;
    let fy = uv.y1.min(uv.y2) * scale_y;
    let block = raster::extract_box(
        texture,
        fx,
        fy,
        width.abs() * scale_x,
        height.abs() * scale_y,
        px_w,
        px_h,
    );

    let total = (px_w as u64 * px_h as u64) as f32;
    let valid = block.pixels().filter(|p| p[3] > 0).count() as f32;
    if valid / total < ignore_fraction {
        return Sample::degenerate(texture_index, scale_x, scale_y);
    }

    Sample {
        texture: texture_index,
        width,
        height,
        scale_x,
        scale_y,
        px_w,
        px_h,
        pixels: Some(block),
    }
}
