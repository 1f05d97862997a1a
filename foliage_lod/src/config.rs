//! LOD and chunking configuration.
//!
//! All fields are optional in serialized form; missing values take the
//! documented defaults. Validation is explicit (`validate()`), so a host can
//! build a config field by field and check it once.

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::foliage_err;

/// Level-of-detail thresholds and far-band simplification parameters.
///
/// Two threshold modes exist:
/// - **World distance** (default): `near_distance < far_distance <=
///   billboard_distance - billboard_blend_width < billboard_distance`.
/// - **Screen size**: when all four `*_px` thresholds are set, instances are
///   classified by their projected height in pixels instead. Larger pixel
///   values mean closer, so `near_in_px > near_out_px >= far_in_px > far_out_px`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    /// When false every visible instance is classified as near
    pub enabled: bool,
    /// Below this distance instances render at full detail
    pub near_distance: f32,
    /// End of the near↔far cross-fade window
    pub far_distance: f32,
    /// End of the far↔billboard cross-fade window (outer bound)
    pub billboard_distance: f32,
    /// Width of the far↔billboard window, ending at `billboard_distance`
    pub billboard_blend_width: f32,
    /// Projected height at which the near↔far window starts
    pub near_in_px: Option<f32>,
    /// Projected height at which the near↔far window ends
    pub near_out_px: Option<f32>,
    /// Projected height at which the far↔billboard window starts
    pub far_in_px: Option<f32>,
    /// Projected height at which the far↔billboard window ends
    pub far_out_px: Option<f32>,
    /// Lower clamp of the projected height, avoids division by zero
    pub epsilon_px: f32,
    /// Approximate world height of one leaf-bearing object (screen-size mode)
    pub approximate_height: f32,
    /// Fraction of leaves kept in far-associated bands
    pub far_sample_ratio: f32,
    /// Size multiplier applied to leaves in far-associated bands
    pub far_scale_mul: f32,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            near_distance: 30.0,
            far_distance: 50.0,
            billboard_distance: 70.0,
            billboard_blend_width: 10.0,
            near_in_px: None,
            near_out_px: None,
            far_in_px: None,
            far_out_px: None,
            epsilon_px: 3.0,
            approximate_height: 10.0,
            far_sample_ratio: 0.4,
            far_scale_mul: 2.0,
        }
    }
}

impl LodConfig {
    /// Set world-distance thresholds
    pub fn with_distances(mut self, near: f32, far: f32, billboard: f32) -> Self {
        self.near_distance = near;
        self.far_distance = far;
        self.billboard_distance = billboard;
        self
    }

    /// Set the far↔billboard window width
    pub fn with_billboard_blend_width(mut self, width: f32) -> Self {
        self.billboard_blend_width = width;
        self
    }

    /// Switch to screen-size thresholds (pixels of projected height)
    pub fn with_screen_thresholds(mut self, near_in: f32, near_out: f32, far_in: f32, far_out: f32) -> Self {
        self.near_in_px = Some(near_in);
        self.near_out_px = Some(near_out);
        self.far_in_px = Some(far_in);
        self.far_out_px = Some(far_out);
        self
    }

    /// Set far-band thinning ratio and size multiplier
    pub fn with_far_simplification(mut self, sample_ratio: f32, scale_mul: f32) -> Self {
        self.far_sample_ratio = sample_ratio;
        self.far_scale_mul = scale_mul;
        self
    }

    /// Enable or disable LOD classification
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// All four screen thresholds, if every one of them is set.
    pub fn screen_thresholds(&self) -> Option<[f32; 4]> {
        match (self.near_in_px, self.near_out_px, self.far_in_px, self.far_out_px) {
            (Some(a), Some(b), Some(c), Some(d)) => Some([a, b, c, d]),
            _ => None,
        }
    }

    /// Distance at which the far↔billboard window opens.
    pub fn billboard_blend_start(&self) -> f32 {
        self.billboard_distance - self.billboard_blend_width
    }

    /// Check threshold ordering and value ranges.
    pub fn validate(&self) -> Result<()> {
        const SOURCE: &str = "foliage::LodConfig";

        let finite = [
            self.near_distance,
            self.far_distance,
            self.billboard_distance,
            self.billboard_blend_width,
            self.epsilon_px,
            self.approximate_height,
            self.far_sample_ratio,
            self.far_scale_mul,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(foliage_err!(SOURCE, "LOD config contains a non-finite value"));
        }

        if !(self.near_distance > 0.0
            && self.near_distance < self.far_distance
            && self.far_distance < self.billboard_distance)
        {
            return Err(foliage_err!(SOURCE,
                "distances must satisfy 0 < near < far < billboard, got {} / {} / {}",
                self.near_distance, self.far_distance, self.billboard_distance));
        }

        let max_width = self.billboard_distance - self.far_distance;
        if !(self.billboard_blend_width > 0.0 && self.billboard_blend_width <= max_width) {
            return Err(foliage_err!(SOURCE,
                "billboard_blend_width must be in (0, {}], got {}",
                max_width, self.billboard_blend_width));
        }

        let px_set = [self.near_in_px, self.near_out_px, self.far_in_px, self.far_out_px]
            .iter()
            .filter(|v| v.is_some())
            .count();
        if px_set != 0 && px_set != 4 {
            return Err(foliage_err!(SOURCE,
                "screen thresholds must be given all together, {} of 4 set", px_set));
        }
        if let Some([near_in, near_out, far_in, far_out]) = self.screen_thresholds() {
            if !(near_in > near_out && near_out >= far_in && far_in > far_out && far_out > 0.0) {
                return Err(foliage_err!(SOURCE,
                    "screen thresholds must satisfy near_in > near_out >= far_in > far_out > 0, got {} / {} / {} / {}",
                    near_in, near_out, far_in, far_out));
            }
        }

        if self.epsilon_px <= 0.0 {
            return Err(foliage_err!(SOURCE, "epsilon_px must be > 0, got {}", self.epsilon_px));
        }
        if self.approximate_height <= 0.0 {
            return Err(foliage_err!(SOURCE,
                "approximate_height must be > 0, got {}", self.approximate_height));
        }
        if !(0.0..=1.0).contains(&self.far_sample_ratio) {
            return Err(foliage_err!(SOURCE,
                "far_sample_ratio must be in [0, 1], got {}", self.far_sample_ratio));
        }
        if self.far_scale_mul <= 0.0 {
            return Err(foliage_err!(SOURCE,
                "far_scale_mul must be > 0, got {}", self.far_scale_mul));
        }
        Ok(())
    }
}

/// Default edge length of a chunk cell.
pub const DEFAULT_CHUNK_SIZE: f32 = 32.0;

/// Top-level configuration of the leaf batching pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafBatchConfig {
    /// Edge length of the XZ grid cells used to group leaves (world units)
    pub chunk_size: f32,
    /// LOD thresholds
    pub lod: LodConfig,
}

impl Default for LeafBatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            lod: LodConfig::default(),
        }
    }
}

impl LeafBatchConfig {
    /// Set the chunk size
    pub fn with_chunk_size(mut self, chunk_size: f32) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the LOD configuration
    pub fn with_lod(mut self, lod: LodConfig) -> Self {
        self.lod = lod;
        self
    }

    /// Validate chunk size and LOD thresholds.
    pub fn validate(&self) -> Result<()> {
        if !(self.chunk_size.is_finite() && self.chunk_size > 0.0) {
            return Err(foliage_err!("foliage::LeafBatchConfig",
                "chunk_size must be > 0, got {}", self.chunk_size));
        }
        self.lod.validate()
    }

    /// Parse a TOML document and validate the result.
    ///
    /// ```
    /// use foliage_lod::foliage::LeafBatchConfig;
    ///
    /// let config = LeafBatchConfig::from_toml_str("chunk_size = 16.0\n[lod]\nfar_sample_ratio = 0.5\n").unwrap();
    /// assert_eq!(config.chunk_size, 16.0);
    /// assert_eq!(config.lod.far_distance, 50.0);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
