use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if `r` shares interior area with `self` (touching edges do
    /// not count as overlap).
    pub fn overlaps(&self, r: &Rect) -> bool {
        !(self.x + self.w <= r.x
            || r.x + r.w <= self.x
            || self.y + self.h <= r.y
            || r.y + r.h <= self.y)
    }
}

/// A face's UV rectangle in texture-space units. `x1 > x2` (or `y1 > y2`)
/// encodes a mirrored mapping along that axis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct UvRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl UvRect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
    /// Signed horizontal extent (`x2 - x1`).
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }
    /// Signed vertical extent (`y2 - y1`).
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
    /// Swap the U extremes (mirrors the mapping horizontally).
    pub fn swap_u(&mut self) {
        std::mem::swap(&mut self.x1, &mut self.x2);
    }
    /// Swap the V extremes (mirrors the mapping vertically).
    pub fn swap_v(&mut self) {
        std::mem::swap(&mut self.y1, &mut self.y2);
    }
}

/// How a group member's original appearance relates to its group's reference
/// content. `FlipBoth` is equivalent to a 180 degree rotation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    Identity,
    FlipHorizontal,
    FlipVertical,
    FlipBoth,
}

/// Pixel block extracted for one face at its original resolution.
///
/// `width`/`height` are signed texture-space extents; a negative value records
/// a mirrored UV mapping on that axis. `pixels` is `None` for faces with zero
/// UV area (`0x0`) or too few valid pixels (`1x1`); such faces still occupy a
/// minimal packing slot but never merge with another face.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Index of the source texture this block was read from.
    pub texture: usize,
    pub width: f32,
    pub height: f32,
    /// Texture-space unit -> source pixel scale factors.
    pub scale_x: f32,
    pub scale_y: f32,
    /// Extracted block size in pixels.
    pub px_w: u32,
    pub px_h: u32,
    pub pixels: Option<RgbaImage>,
}

impl Sample {
    /// Marker for a face whose UV rectangle has zero extent or scales below
    /// one pixel.
    pub fn invalid(texture: usize, scale_x: f32, scale_y: f32) -> Self {
        Self {
            texture,
            width: 0.0,
            height: 0.0,
            scale_x,
            scale_y,
            px_w: 0,
            px_h: 0,
            pixels: None,
        }
    }

    /// Marker for a face whose valid-pixel share fell below the ignore
    /// threshold. Packs as a 1x1 slot, never merges.
    pub fn degenerate(texture: usize, scale_x: f32, scale_y: f32) -> Self {
        Self {
            texture,
            width: 1.0,
            height: 1.0,
            scale_x,
            scale_y,
            px_w: 1,
            px_h: 1,
            pixels: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.pixels.is_some()
    }
}

/// A sample downscaled to the coarsest resolution that still reconstructs
/// within tolerance. `width`/`height` signs mirror the source sample's UV
/// mirroring; `pixels` is `None` when the sample carried no data.
#[derive(Debug, Clone)]
pub struct ReducedSample {
    pub width: i32,
    pub height: i32,
    pub pixels: Option<RgbaImage>,
}

impl ReducedSample {
    pub fn abs_w(&self) -> u32 {
        self.width.unsigned_abs()
    }
    pub fn abs_h(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

/// One face entry within a group: the face's index in the input list plus the
/// transform mapping the group reference's content onto this face's original
/// appearance.
#[derive(Debug, Clone, Copy)]
pub struct GroupMember {
    pub face: usize,
    pub transform: Transform,
}

/// Ordered group of faces sharing one canonical appearance. The first member
/// is the reference (always `Transform::Identity`).
#[derive(Debug, Clone)]
pub struct FaceGroup {
    pub members: Vec<GroupMember>,
}

impl FaceGroup {
    pub fn singleton(face: usize) -> Self {
        Self {
            members: vec![GroupMember {
                face,
                transform: Transform::Identity,
            }],
        }
    }
    /// Index of the reference face.
    pub fn reference(&self) -> usize {
        self.members[0].face
    }
}

/// Statistics about an optimization run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptimizeStats {
    /// Total number of input faces.
    pub num_faces: usize,
    /// Number of distinct face groups after similarity grouping.
    pub num_groups: usize,
    /// Faces that joined an existing group instead of keeping their own slot.
    pub num_merged: usize,
    /// Faces whose texture block was reduced below its sampled resolution.
    pub num_downsized: usize,
    /// Final surface dimensions.
    pub surface_width: u32,
    pub surface_height: u32,
    /// Total area of all slots (pixels).
    pub used_area: u64,
    /// used_area / surface area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
}

impl OptimizeStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Faces: {}, Groups: {}, Merged: {}, Downsized: {}, Surface: {}x{}, Occupancy: {:.2}%",
            self.num_faces,
            self.num_groups,
            self.num_merged,
            self.num_downsized,
            self.surface_width,
            self.surface_height,
            self.occupancy * 100.0,
        )
    }
}
