use image::{Rgba, RgbaImage};
use uv_optimizer_core::model::UvRect;
use uv_optimizer_core::sampler::sample_face;

fn gradient_texture(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x * 16) as u8, (y * 16) as u8, 128, 255])
    })
}

#[test]
fn extracts_the_covered_block_at_unit_scale() {
    let tex = gradient_texture(8, 8);
    let uv = UvRect::new(2.0, 2.0, 6.0, 6.0);
    let s = sample_face(0, &tex, (8.0, 8.0), &uv, 0.01);
    assert!(s.has_data());
    assert_eq!((s.px_w, s.px_h), (4, 4));
    let block = s.pixels.as_ref().unwrap();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(block.get_pixel(x, y), tex.get_pixel(x + 2, y + 2));
        }
    }
    assert!(s.width > 0.0 && s.height > 0.0);
}

#[test]
fn uv_units_scale_to_texture_pixels() {
    // 16px texture over an 8-unit UV space: one unit covers two pixels
    let tex = gradient_texture(16, 16);
    let uv = UvRect::new(0.0, 0.0, 4.0, 4.0);
    let s = sample_face(0, &tex, (8.0, 8.0), &uv, 0.01);
    assert_eq!((s.px_w, s.px_h), (8, 8));
    assert_eq!((s.scale_x, s.scale_y), (2.0, 2.0));
}

#[test]
fn mirrored_uv_records_negative_extents_with_identical_pixels() {
    let tex = gradient_texture(8, 8);
    let forward = sample_face(0, &tex, (8.0, 8.0), &UvRect::new(2.0, 2.0, 6.0, 6.0), 0.01);
    let mirrored = sample_face(0, &tex, (8.0, 8.0), &UvRect::new(6.0, 2.0, 2.0, 6.0), 0.01);
    assert!(mirrored.width < 0.0);
    assert!(mirrored.height > 0.0);
    assert_eq!(
        forward.pixels.as_ref().unwrap().as_raw(),
        mirrored.pixels.as_ref().unwrap().as_raw(),
    );
}

#[test]
fn zero_extent_uv_is_invalid() {
    let tex = gradient_texture(8, 8);
    let s = sample_face(0, &tex, (8.0, 8.0), &UvRect::new(3.0, 1.0, 3.0, 5.0), 0.01);
    assert!(!s.has_data());
    assert_eq!((s.px_w, s.px_h), (0, 0));
}

#[test]
fn sub_pixel_uv_is_invalid() {
    // 8px texture over a 16-unit UV space: half-unit extent rounds below 1px
    let tex = gradient_texture(8, 8);
    let s = sample_face(0, &tex, (16.0, 16.0), &UvRect::new(0.0, 0.0, 0.5, 4.0), 0.01);
    assert!(!s.has_data());
    assert_eq!((s.px_w, s.px_h), (0, 0));
}

#[test]
fn mostly_transparent_face_downgrades_to_degenerate() {
    // one valid pixel out of 256 = ~0.4%, below a 1% threshold
    let mut tex = RgbaImage::from_pixel(16, 16, Rgba([30, 30, 30, 0]));
    tex.put_pixel(3, 3, Rgba([30, 30, 30, 255]));
    let s = sample_face(0, &tex, (16.0, 16.0), &UvRect::new(0.0, 0.0, 16.0, 16.0), 0.01);
    assert!(!s.has_data());
    assert_eq!((s.px_w, s.px_h), (1, 1));
    assert_eq!((s.width, s.height), (1.0, 1.0));
}

#[test]
fn threshold_zero_keeps_fully_transparent_faces() {
    let tex = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
    let s = sample_face(0, &tex, (8.0, 8.0), &UvRect::new(0.0, 0.0, 8.0, 8.0), 0.0);
    assert!(s.has_data(), "0% threshold must not discard any face");
}
