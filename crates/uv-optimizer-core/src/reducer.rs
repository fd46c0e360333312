use crate::model::{ReducedSample, Sample};
use crate::raster;
use crate::similarity::match_fraction;
use tracing::debug;

/// Search for the coarsest halving of `sample`'s block that still
/// reconstructs the original within `tolerance`.
///
/// Each candidate halves both dimensions (floor, minimum 1), downscales the
/// *original* block to that size, upscales it back nearest-neighbor, and
/// compares against the original. The search is greedy and monotone: the
/// first failing size ends it, and the previous size is kept. A tolerance
/// above 1.0 therefore leaves the size unchanged.
///
/// Samples without data pass through at their marker size.
pub fn reduce_sample(sample: &Sample, tolerance: f32) -> ReducedSample {
    let sign_w: i32 = if sample.width < 0.0 { -1 } else { 1 };
    let sign_h: i32 = if sample.height < 0.0 { -1 } else { 1 };

    let Some(original) = sample.pixels.as_ref() else {
        return ReducedSample {
            width: sample.px_w as i32 * sign_w,
            height: sample.px_h as i32 * sign_h,
            pixels: None,
        };
    };

    let (orig_w, orig_h) = (sample.px_w, sample.px_h);
    let mut best_w = orig_w;
    let mut best_h = orig_h;
    let mut best = original.clone();
    let mut cur_w = orig_w;
    let mut cur_h = orig_h;

    while cur_w > 1 || cur_h > 1 {
        cur_w = (cur_w / 2).max(1);
        cur_h = (cur_h / 2).max(1);

        let small = raster::scale_nearest(original, cur_w, cur_h);
        let upscaled = raster::scale_nearest(&small, orig_w, orig_h);
        if match_fraction(original.as_raw(), upscaled.as_raw()) < tolerance {
            break;
        }
        best_w = cur_w;
        best_h = cur_h;
        best = small;
    }

    if best_w != orig_w || best_h != orig_h {
        debug!(
            from_w = orig_w,
            from_h = orig_h,
            to_w = best_w,
            to_h = best_h,
            "downsized face block"
        );
    }

    ReducedSample {
        width: best_w as i32 * sign_w,
        height: best_h as i32 * sign_h,
        pixels: Some(best),
    }
}
