use crate::compositing;
use crate::config::OptimizerConfig;
use crate::error::{Result, UvOptimizeError};
use crate::grouper::group_faces;
use crate::model::{OptimizeStats, Rect, ReducedSample, Sample, UvRect};
use crate::packer::GuillotinePacker;
use crate::reducer::reduce_sample;
use crate::sampler::sample_face;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Initial packing surface; grown on failure per the resize schedule.
const INITIAL_SURFACE: u32 = 16;

/// One quad face of the host model: a key, its UV rectangle, and an optional
/// index into the texture list (`None` means the first texture).
#[derive(Debug, Clone)]
pub struct InputFace {
    pub key: String,
    pub uv: UvRect,
    pub texture: Option<usize>,
}

/// A source texture (key + decoded image).
pub struct InputTexture {
    pub key: String,
    pub image: DynamicImage,
}

/// The host model slice the optimizer works on. `uv_width`/`uv_height` are
/// the texture-space dimensions of the UV coordinate system; the first
/// texture caps the output surface size and receives the composed atlas.
pub struct InputModel {
    pub faces: Vec<InputFace>,
    pub textures: Vec<InputTexture>,
    pub uv_width: f32,
    pub uv_height: f32,
}

/// Updated UV rectangle for one face, in the output UV space (one unit per
/// atlas pixel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedFace {
    pub key: String,
    pub uv: UvRect,
}

/// Result of an optimization run: per-face UVs in input order, the new
/// texture-space dimensions, the composed atlas, and run statistics.
#[derive(Debug)]
pub struct OptimizeOutput {
    pub faces: Vec<OptimizedFace>,
    pub uv_width: u32,
    pub uv_height: u32,
    pub atlas: RgbaImage,
    pub stats: OptimizeStats,
}

#[instrument(skip_all)]
/// Optimize the model's face UVs: sample each face's texture block, downsize
/// blocks within tolerance, merge visually identical faces (including flip
/// and 180-degree variants), pack the distinct regions into the smallest
/// surface the growth schedule reaches, and compose the merged atlas.
///
/// Pure function of its inputs: on any error the caller's state is untouched
/// and no partial result is produced.
pub fn optimize_uv(model: InputModel, cfg: OptimizerConfig) -> Result<OptimizeOutput> {
    cfg.validate()?;

    if model.faces.is_empty() {
        return Err(UvOptimizeError::NoFaces);
    }
    if model.textures.is_empty() {
        return Err(UvOptimizeError::NoTextures);
    }
    if !(model.uv_width > 0.0 && model.uv_height > 0.0) {
        return Err(UvOptimizeError::InvalidModel(format!(
            "texture-space dimensions must be positive, got {}x{}",
            model.uv_width, model.uv_height
        )));
    }
    for face in &model.faces {
        if let Some(t) = face.texture {
            if t >= model.textures.len() {
                return Err(UvOptimizeError::MissingTexture(t));
            }
        }
    }

    let textures: Vec<RgbaImage> = model.textures.iter().map(|t| t.image.to_rgba8()).collect();
    let uv_space = (model.uv_width, model.uv_height);

    // Stages 1 and 2 are per-face with no cross-face state; grouping and
    // packing below are order-dependent and stay sequential.
    let ignore = cfg.ignore_fraction();
    let samples: Vec<Sample> = per_face(model.faces.len(), |i| {
        let face = &model.faces[i];
        let tex = face.texture.unwrap_or(0);
        sample_face(tex, &textures[tex], uv_space, &face.uv, ignore)
    });

    let tolerance = cfg.downsize_tolerance();
    let reduced: Vec<ReducedSample> =
        per_face(samples.len(), |i| reduce_sample(&samples[i], tolerance));

    let groups = group_faces(
        &reduced,
        cfg.similarity_tolerance(),
        cfg.check_flip,
        cfg.rearrange_only,
    );

    // Footprints include padding on every side; the gap is added at insert
    // time only, so slots stay gap-free.
    let padding = cfg.padding;
    let footprints: Vec<(u32, u32)> = groups
        .iter()
        .map(|g| {
            let r = &reduced[g.reference()];
            (r.abs_w() + padding * 2, r.abs_h() + padding * 2)
        })
        .collect();

    // Largest area first; stable sort keeps creation order on ties.
    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(footprints[i].0 as u64 * footprints[i].1 as u64));

    let (max_w, max_h) = textures[0].dimensions();
    let mut surface = (INITIAL_SURFACE, INITIAL_SURFACE);
    let mut widen = true;
    let slots: Vec<Rect> = loop {
        if surface.0 > max_w || surface.1 > max_h {
            return Err(UvOptimizeError::OutOfSpace { max_w, max_h });
        }
        match try_pack(&order, &footprints, surface, cfg.gap)? {
            Some(slots) => break slots,
            None => {
                if cfg.square {
                    surface.0 *= 2;
                    surface.1 *= 2;
                } else if widen {
                    surface.0 *= 2;
                } else {
                    surface.1 *= 2;
                }
                widen = !widen;
            }
        }
    };

    let atlas = compositing::compose_atlas(surface.0, surface.1, &groups, &slots, &samples, padding);

    let mut uvs = vec![UvRect::default(); model.faces.len()];
    for (slot, group) in slots.iter().zip(&groups) {
        for member in &group.members {
            uvs[member.face] =
                compositing::derive_uv(slot, padding, &samples[member.face], member.transform);
        }
    }
    let faces = model
        .faces
        .iter()
        .zip(&uvs)
        .map(|(face, &uv)| OptimizedFace {
            key: face.key.clone(),
            uv,
        })
        .collect();

    let used_area: u64 = slots.iter().map(Rect::area).sum();
    let surface_area = surface.0 as u64 * surface.1 as u64;
    let num_downsized = (0..samples.len())
        .filter(|&i| {
            samples[i].has_data()
                && (reduced[i].abs_w() < samples[i].px_w || reduced[i].abs_h() < samples[i].px_h)
        })
        .count();
    let stats = OptimizeStats {
        num_faces: model.faces.len(),
        num_groups: groups.len(),
        num_merged: model.faces.len() - groups.len(),
        num_downsized,
        surface_width: surface.0,
        surface_height: surface.1,
        used_area,
        occupancy: used_area as f64 / surface_area as f64,
    };

    Ok(OptimizeOutput {
        faces,
        uv_width: surface.0,
        uv_height: surface.1,
        atlas,
        stats,
    })
}

/// One packing attempt on a fresh packer. `Ok(None)` means the surface is too
/// small; a completed attempt with overlapping placements is an internal
/// fault.
fn try_pack(
    order: &[usize],
    footprints: &[(u32, u32)],
    surface: (u32, u32),
    gap: u32,
) -> Result<Option<Vec<Rect>>> {
    let mut packer = GuillotinePacker::new(surface.0, surface.1);
    let mut slots = vec![Rect::new(0, 0, 0, 0); footprints.len()];
    for &gi in order {
        let (w, h) = footprints[gi];
        match packer.insert(w + gap, h + gap) {
            Some(pos) => slots[gi] = Rect::new(pos.x, pos.y, w, h),
            None => return Ok(None),
        }
    }
    if packer.has_overlapping_placements() {
        return Err(UvOptimizeError::Internal(
            "packer produced overlapping placements".into(),
        ));
    }
    Ok(Some(slots))
}

#[cfg(feature = "parallel")]
fn per_face<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..n).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn per_face<T, F>(n: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..n).map(f).collect()
}
