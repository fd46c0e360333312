use serde::{Deserialize, Serialize};

/// Optimization parameters.
///
/// Thresholds are percentages matching the ranges the host settings layer
/// offers; `validate` enforces them. `rearrange_only` keeps every face
/// distinct and at its sampled resolution while still repacking the layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Blank pixels kept between packed groups.
    pub gap: u32,
    /// Face-merge similarity threshold, percent (50..=100).
    pub similarity_threshold: u8,
    /// Faces whose valid (alpha > 0) pixel share is below this percent are
    /// packed as degenerate 1x1 entries and never merged (0..=100).
    pub ignore_valid_pixel_percent: u8,
    /// Texture downsize acceptance threshold, percent (50..=100).
    pub downsize_threshold: u8,
    /// Pixels of padding on each side of a group's content inside its slot
    /// (0..=5).
    pub padding: u32,
    /// Also test horizontal, vertical and 180-degree flipped variants when
    /// merging faces.
    pub check_flip: bool,
    /// Grow the packing surface on both axes at once so the output stays
    /// square.
    pub square: bool,
    /// Repack only: no merging, no downsizing.
    pub rearrange_only: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            gap: 0,
            similarity_threshold: 90,
            ignore_valid_pixel_percent: 1,
            downsize_threshold: 90,
            padding: 0,
            check_flip: true,
            square: false,
            rearrange_only: false,
        }
    }
}

/// A tolerance above 1.0 can never be met, so every downsize candidate is
/// rejected and sizes pass through unchanged.
pub(crate) const DISABLED_TOLERANCE: f32 = 1.1;

impl OptimizerConfig {
    /// Validates the configuration parameters against the documented ranges.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::UvOptimizeError;

        if !(50..=100).contains(&self.similarity_threshold) {
            return Err(UvOptimizeError::InvalidConfig(format!(
                "similarity_threshold must be in 50..=100, got {}",
                self.similarity_threshold
            )));
        }
        if !(50..=100).contains(&self.downsize_threshold) {
            return Err(UvOptimizeError::InvalidConfig(format!(
                "downsize_threshold must be in 50..=100, got {}",
                self.downsize_threshold
            )));
        }
        if self.ignore_valid_pixel_percent > 100 {
            return Err(UvOptimizeError::InvalidConfig(format!(
                "ignore_valid_pixel_percent must be in 0..=100, got {}",
                self.ignore_valid_pixel_percent
            )));
        }
        if self.padding > 5 {
            return Err(UvOptimizeError::InvalidConfig(format!(
                "padding must be in 0..=5, got {}",
                self.padding
            )));
        }
        Ok(())
    }

    /// Face-merge tolerance as a fraction.
    pub(crate) fn similarity_tolerance(&self) -> f32 {
        self.similarity_threshold as f32 / 100.0
    }

    /// Downsize tolerance as a fraction; unreachable in rearrange-only mode.
    pub(crate) fn downsize_tolerance(&self) -> f32 {
        if self.rearrange_only {
            DISABLED_TOLERANCE
        } else {
            self.downsize_threshold as f32 / 100.0
        }
    }

    /// Minimum valid-pixel share as a fraction.
    pub(crate) fn ignore_fraction(&self) -> f32 {
        self.ignore_valid_pixel_percent as f32 / 100.0
    }
}

/// Builder for `OptimizerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct OptimizerConfigBuilder {
    cfg: OptimizerConfig,
}

impl OptimizerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: OptimizerConfig::default(),
        }
    }
    pub fn gap(mut self, v: u32) -> Self {
        self.cfg.gap = v;
        self
    }
    pub fn similarity_threshold(mut self, v: u8) -> Self {
        self.cfg.similarity_threshold = v;
        self
    }
    pub fn ignore_valid_pixel_percent(mut self, v: u8) -> Self {
        self.cfg.ignore_valid_pixel_percent = v;
        self
    }
    pub fn downsize_threshold(mut self, v: u8) -> Self {
        self.cfg.downsize_threshold = v;
        self
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn check_flip(mut self, v: bool) -> Self {
        self.cfg.check_flip = v;
        self
    }
    pub fn square(mut self, v: bool) -> Self {
        self.cfg.square = v;
        self
    }
    pub fn rearrange_only(mut self, v: bool) -> Self {
        self.cfg.rearrange_only = v;
        self
    }
    pub fn build(self) -> OptimizerConfig {
        self.cfg
    }
}

impl OptimizerConfig {
    /// Create a fluent builder for `OptimizerConfig`.
    pub fn builder() -> OptimizerConfigBuilder {
        OptimizerConfigBuilder::new()
    }
}
