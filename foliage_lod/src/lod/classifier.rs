/// LOD classification of leaf-bearing instances.
///
/// Instances are split into five groups by a scalar LOD metric:
///
/// ```text
///  metric:  0 ── a ─────── b ─────── c ─────── d ──────▶
///  group:   nearSolid │ nearFarBlend │ farSolid │ farBillboardBlend │ culled
/// ```
///
/// In world-distance mode `a..d` are near / far / billboard-blend-start /
/// billboard distances. In screen-size mode the metric is the inverse of the
/// projected height in pixels and `a..d` are the inverted pixel thresholds.
/// A metric equal to a threshold belongs to the more detailed group.

use std::sync::Arc;
use glam::Vec3;
use crate::config::LodConfig;
use crate::scene::SceneInstance;

/// Distances below this are clamped to avoid infinite projected sizes.
const MIN_DISTANCE: f32 = 0.001;
/// Lower clamp for window widths when normalizing `t`.
const MIN_WINDOW: f32 = 1e-6;

/// Camera parameters needed for classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodView {
    /// Camera world position
    pub position: Vec3,
    /// Viewport height in pixels (screen-size mode only)
    pub viewport_height_px: f32,
    /// Vertical field of view in radians (screen-size mode only)
    pub fov_y: f32,
}

impl LodView {
    /// Camera at `position` with a 1080px, 60° projection
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            viewport_height_px: 1080.0,
            fov_y: 60f32.to_radians(),
        }
    }

    /// Set the projection used for screen-size classification
    pub fn with_projection(mut self, viewport_height_px: f32, fov_y: f32) -> Self {
        self.viewport_height_px = viewport_height_px;
        self.fov_y = fov_y;
        self
    }

    /// Pixels per world unit at distance 1.
    fn projection_factor(&self) -> f32 {
        self.viewport_height_px / (2.0 * (self.fov_y * 0.5).tan())
    }
}

/// The five LOD groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LodBand {
    NearSolid,
    NearFarBlend,
    FarSolid,
    FarBillboardBlend,
    Culled,
}

/// An instance inside a transition window, with its position `t` in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct BlendedInstance {
    pub instance: Arc<SceneInstance>,
    /// 0 at the detailed edge of the window, 1 at the simplified edge
    pub t: f32,
}

/// Per-representation weights of one instance; they sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodWeights {
    pub near: f32,
    pub far: f32,
    pub billboard: f32,
}

/// Result of classifying one set of instances.
///
/// Each group is sorted by instance uuid.
#[derive(Debug, Clone, Default)]
pub struct LodPartition {
    pub near_solid: Vec<Arc<SceneInstance>>,
    pub near_far_blend: Vec<BlendedInstance>,
    pub far_solid: Vec<Arc<SceneInstance>>,
    pub far_billboard_blend: Vec<BlendedInstance>,
    pub culled: Vec<Arc<SceneInstance>>,
}

impl LodPartition {
    /// Number of instances that will be rendered (all but culled)
    pub fn rendered_count(&self) -> usize {
        self.near_solid.len()
            + self.near_far_blend.len()
            + self.far_solid.len()
            + self.far_billboard_blend.len()
    }

    /// Number of instances across all five groups
    pub fn total_count(&self) -> usize {
        self.rendered_count() + self.culled.len()
    }

    /// Instances of the near↔far window, without weights
    pub fn near_far_instances(&self) -> Vec<Arc<SceneInstance>> {
        self.near_far_blend.iter().map(|b| b.instance.clone()).collect()
    }

    /// Instances of the far↔billboard window, without weights
    pub fn far_billboard_instances(&self) -> Vec<Arc<SceneInstance>> {
        self.far_billboard_blend.iter().map(|b| b.instance.clone()).collect()
    }
}

/// Splits instances into LOD groups.
#[derive(Debug, Clone)]
pub struct LodClassifier {
    config: LodConfig,
}

impl LodClassifier {
    /// Create a classifier
    pub fn new(config: LodConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &LodConfig {
        &self.config
    }

    /// Whether screen-size thresholds are in use
    pub fn uses_screen_size(&self) -> bool {
        self.config.screen_thresholds().is_some()
    }

    /// Group boundaries `[a, b, c, d]` in metric space.
    pub fn thresholds(&self) -> [f32; 4] {
        match self.config.screen_thresholds() {
            Some(px) => {
                let eps = self.config.epsilon_px.max(1e-3);
                px.map(|p| 1.0 / p.max(eps))
            }
            None => [
                self.config.near_distance,
                self.config.far_distance,
                self.config.billboard_blend_start(),
                self.config.billboard_distance,
            ],
        }
    }

    /// LOD metric of a world position: distance to the camera, or the
    /// inverse projected height in screen-size mode.
    pub fn metric(&self, view: &LodView, position: Vec3) -> f32 {
        let distance = view.position.distance(position).max(MIN_DISTANCE);
        if self.uses_screen_size() {
            let height_world = self.config.approximate_height.max(MIN_DISTANCE);
            let size_px = height_world * view.projection_factor() / distance;
            let eps = self.config.epsilon_px.max(1e-3);
            1.0 / size_px.max(eps)
        } else {
            distance
        }
    }

    /// Group and window position for a metric value.
    pub fn classify_metric(&self, metric: f32) -> (LodBand, f32) {
        if !self.config.enabled {
            return (LodBand::NearSolid, 0.0);
        }
        let [a, b, c, d] = self.thresholds();
        if metric <= a {
            (LodBand::NearSolid, 0.0)
        } else if metric <= b {
            (LodBand::NearFarBlend, window_t(metric, a, b))
        } else if metric <= c {
            (LodBand::FarSolid, 0.0)
        } else if metric <= d {
            (LodBand::FarBillboardBlend, window_t(metric, c, d))
        } else {
            (LodBand::Culled, 0.0)
        }
    }

    /// Representation weights for a metric value.
    pub fn weights(&self, metric: f32) -> LodWeights {
        let (band, t) = self.classify_metric(metric);
        match band {
            LodBand::NearSolid => LodWeights { near: 1.0, far: 0.0, billboard: 0.0 },
            LodBand::NearFarBlend => LodWeights { near: 1.0 - t, far: t, billboard: 0.0 },
            LodBand::FarSolid => LodWeights { near: 0.0, far: 1.0, billboard: 0.0 },
            LodBand::FarBillboardBlend => LodWeights { near: 0.0, far: 1.0 - t, billboard: t },
            LodBand::Culled => LodWeights { near: 0.0, far: 0.0, billboard: 1.0 },
        }
    }

    /// Classify instances by the distance of their origin to the camera.
    pub fn partition(&self, instances: &[Arc<SceneInstance>], view: &LodView) -> LodPartition {
        let mut out = LodPartition::default();

        for instance in instances {
            let metric = self.metric(view, instance.transform.position());
            let (band, t) = self.classify_metric(metric);
            match band {
                LodBand::NearSolid => out.near_solid.push(instance.clone()),
                LodBand::NearFarBlend => out.near_far_blend.push(BlendedInstance {
                    instance: instance.clone(),
                    t,
                }),
                LodBand::FarSolid => out.far_solid.push(instance.clone()),
                LodBand::FarBillboardBlend => out.far_billboard_blend.push(BlendedInstance {
                    instance: instance.clone(),
                    t,
                }),
                LodBand::Culled => out.culled.push(instance.clone()),
            }
        }

        // Stable order keeps bucket contents identical when instances
        // only migrate between groups.
        out.near_solid.sort_by(|x, y| x.uuid.cmp(&y.uuid));
        out.far_solid.sort_by(|x, y| x.uuid.cmp(&y.uuid));
        out.culled.sort_by(|x, y| x.uuid.cmp(&y.uuid));
        out.near_far_blend.sort_by(|x, y| x.instance.uuid.cmp(&y.instance.uuid));
        out.far_billboard_blend.sort_by(|x, y| x.instance.uuid.cmp(&y.instance.uuid));

        out
    }
}

fn window_t(metric: f32, start: f32, end: f32) -> f32 {
    ((metric - start) / (end - start).max(MIN_WINDOW)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
