//! Core library for optimizing textured face UVs.
//!
//! - Detects faces with identical or near-identical pixel content (including
//!   horizontal/vertical flips and 180 degree rotations) and merges them onto
//!   one texture region
//! - Downsizes each region to the coarsest resolution that still looks the
//!   same within a tolerance (iterative halving)
//! - Repacks the distinct regions into a compact atlas with a bottom-left
//!   guillotine packer, growing the surface until the layout fits
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use uv_optimizer_core::{optimize_uv, InputFace, InputModel, InputTexture, OptimizerConfig, UvRect};
//! # fn main() -> anyhow::Result<()> {
//! let skin = ImageReader::open("skin.png")?.decode()?;
//! let model = InputModel {
//!     faces: vec![
//!         InputFace { key: "north".into(), uv: UvRect::new(0.0, 0.0, 4.0, 4.0), texture: None },
//!         InputFace { key: "south".into(), uv: UvRect::new(4.0, 0.0, 8.0, 4.0), texture: None },
//!     ],
//!     textures: vec![InputTexture { key: "skin".into(), image: skin }],
//!     uv_width: 16.0,
//!     uv_height: 16.0,
//! };
//! let out = optimize_uv(model, OptimizerConfig::default())?;
//! println!("atlas: {}x{}", out.uv_width, out.uv_height);
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod grouper;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod raster;
pub mod reducer;
pub mod sampler;
pub mod similarity;

pub use config::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `uv_optimizer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{OptimizerConfig, OptimizerConfigBuilder};
    pub use crate::model::{
        FaceGroup, OptimizeStats, Rect, ReducedSample, Sample, Transform, UvRect,
    };
    pub use crate::packer::GuillotinePacker;
    pub use crate::{
        InputFace, InputModel, InputTexture, OptimizeOutput, OptimizedFace, optimize_uv,
    };
}
