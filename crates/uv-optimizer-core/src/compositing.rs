use crate::model::{FaceGroup, Rect, Sample, Transform, UvRect};
use crate::raster;
use image::RgbaImage;

/// Render every group's reference content into its slot on a transparent
/// surface.
///
/// The reference's full-resolution sample block is nearest-neighbor scaled
/// into the slot's content rectangle (the slot inset by `padding` on all
/// sides); groups without pixel data leave their slot blank. Slots never
/// overlap, so composition order is irrelevant.
pub fn compose_atlas(
    width: u32,
    height: u32,
    groups: &[FaceGroup],
    slots: &[Rect],
    samples: &[Sample],
    padding: u32,
) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    for (group, slot) in groups.iter().zip(slots) {
        let sample = &samples[group.reference()];
        let Some(block) = sample.pixels.as_ref() else {
            continue;
        };
        let content_w = slot.w.saturating_sub(padding * 2);
        let content_h = slot.h.saturating_sub(padding * 2);
        if content_w == 0 || content_h == 0 {
            continue;
        }
        let scaled = raster::scale_nearest(block, content_w, content_h);
        raster::blit(&scaled, &mut canvas, slot.x + padding, slot.y + padding);
    }
    canvas
}

/// Derive a member face's new UV rectangle from its group's slot.
///
/// The rectangle spans the slot's content area. Axes whose *source* UV was
/// mirrored (negative signed extent on the member's own sample) keep that
/// mirroring by swapping the corresponding extremes; the member's transform
/// is then inverted by swapping the U extremes (flip-h), the V extremes
/// (flip-v), or both (flip-both / 180 degrees).
pub fn derive_uv(slot: &Rect, padding: u32, sample: &Sample, transform: Transform) -> UvRect {
    let content_w = slot.w.saturating_sub(padding * 2) as f32;
    let content_h = slot.h.saturating_sub(padding * 2) as f32;
    let x = (slot.x + padding) as f32;
    let y = (slot.y + padding) as f32;
    let mut uv = UvRect::new(x, y, x + content_w, y + content_h);

    if sample.width < 0.0 {
        uv.swap_u();
    }
    if sample.height < 0.0 {
        uv.swap_v();
    }
    match transform {
        Transform::Identity => {}
        Transform::FlipHorizontal => uv.swap_u(),
        Transform::FlipVertical => uv.swap_v(),
        Transform::FlipBoth => {
            uv.swap_u();
            uv.swap_v();
        }
    }
    uv
}
