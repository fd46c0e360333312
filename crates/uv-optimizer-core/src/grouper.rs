use crate::model::{FaceGroup, GroupMember, ReducedSample, Transform};
use crate::raster;
use crate::similarity::match_fraction;
use image::RgbaImage;
use tracing::debug;

/// Partition faces into appearance groups with a first-fit scan.
///
/// Faces are visited in input order. A face without comparable data, or any
/// face when `rearrange_only` is set, becomes its own singleton group. Every
/// other face joins the first existing group whose reference has data, whose
/// reduced |width| and |height| match exactly, and whose content matches
/// under one of the accepted transforms; otherwise it starts a new group.
/// Group creation order is stable for identical input order.
pub fn group_faces(
    reduced: &[ReducedSample],
    threshold: f32,
    check_flip: bool,
    rearrange_only: bool,
) -> Vec<FaceGroup> {
    let mut groups: Vec<FaceGroup> = Vec::new();

    for (idx, cand) in reduced.iter().enumerate() {
        let mut joined = false;
        if !rearrange_only && cand.pixels.is_some() {
            for group in groups.iter_mut() {
                let reference = &reduced[group.reference()];
                let Some(ref_pixels) = reference.pixels.as_ref() else {
                    continue;
                };
                if reference.abs_w() != cand.abs_w() || reference.abs_h() != cand.abs_h() {
                    continue;
                }
                if let Some(transform) = matching_transform(cand, ref_pixels, threshold, check_flip)
                {
                    debug!(face = idx, ?transform, "merged face into group");
                    group.members.push(GroupMember {
                        face: idx,
                        transform,
                    });
                    joined = true;
                    break;
                }
            }
        }
        if !joined {
            groups.push(FaceGroup::singleton(idx));
        }
    }

    groups
}

/// Identity first, then (when enabled) horizontal, vertical and both-axis
/// flips of the candidate against the reference; the first variant meeting
/// the threshold wins.
fn matching_transform(
    cand: &ReducedSample,
    reference: &RgbaImage,
    threshold: f32,
    check_flip: bool,
) -> Option<Transform> {
    let pixels = cand.pixels.as_ref()?;
    if match_fraction(pixels.as_raw(), reference.as_raw()) >= threshold {
        return Some(Transform::Identity);
    }
    if !check_flip {
        return None;
    }
    for t in [
        Transform::FlipHorizontal,
        Transform::FlipVertical,
        Transform::FlipBoth,
    ] {
        let flipped = raster::transformed(pixels, t);
        if match_fraction(flipped.as_raw(), reference.as_raw()) >= threshold {
            return Some(t);
        }
    }
    None
}
