use crate::config::{
    AMBIENT_OCCLUSION_STRENGTH_RANGE, DEFAULT_AMBIENT_OCCLUSION_STRENGTH, DEFAULT_INTERSECTION_THRESHOLD,
    DEFAULT_MAX_DISTANCE, DEFAULT_MAX_STEPS, INTERSECTION_THRESHOLD_RANGE, MAX_DISTANCE_RANGE,
    MAX_STEPS_RANGE,
};
use serde::{Deserialize, Serialize};

/// Ray-march quality settings. Every value is kept within its range in [`crate::config`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "UnclampedRenderSettings")]
pub struct RenderSettings {
    max_steps: u32,
    max_distance: f32,
    intersection_threshold: f32,
    ambient_occlusion_strength: f32,
}

impl RenderSettings {
    pub fn new(
        max_steps: u32,
        max_distance: f32,
        intersection_threshold: f32,
        ambient_occlusion_strength: f32,
    ) -> Self {
        let mut settings = Self::default();
        settings.set_max_steps(max_steps);
        settings.set_max_distance(max_distance);
        settings.set_intersection_threshold(intersection_threshold);
        settings.set_ambient_occlusion_strength(ambient_occlusion_strength);
        settings
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }
    pub fn intersection_threshold(&self) -> f32 {
        self.intersection_threshold
    }
    pub fn ambient_occlusion_strength(&self) -> f32 {
        self.ambient_occlusion_strength
    }

    pub fn set_max_steps(&mut self, max_steps: u32) {
        self.max_steps = max_steps.clamp(MAX_STEPS_RANGE.0, MAX_STEPS_RANGE.1);
    }
    pub fn set_max_distance(&mut self, max_distance: f32) {
        self.max_distance = clamp_f32(max_distance, MAX_DISTANCE_RANGE);
    }
    pub fn set_intersection_threshold(&mut self, intersection_threshold: f32) {
        self.intersection_threshold = clamp_f32(intersection_threshold, INTERSECTION_THRESHOLD_RANGE);
    }
    pub fn set_ambient_occlusion_strength(&mut self, ambient_occlusion_strength: f32) {
        self.ambient_occlusion_strength =
            clamp_f32(ambient_occlusion_strength, AMBIENT_OCCLUSION_STRENGTH_RANGE);
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_distance: DEFAULT_MAX_DISTANCE,
            intersection_threshold: DEFAULT_INTERSECTION_THRESHOLD,
            ambient_occlusion_strength: DEFAULT_AMBIENT_OCCLUSION_STRENGTH,
        }
    }
}

/// NaN is replaced by the lower bound
fn clamp_f32(value: f32, range: (f32, f32)) -> f32 {
    if value.is_nan() {
        return range.0;
    }
    value.clamp(range.0, range.1)
}

/// Deserialization target. Values from disk pass through the clamping setters.
#[derive(Deserialize)]
struct UnclampedRenderSettings {
    max_steps: u32,
    max_distance: f32,
    intersection_threshold: f32,
    ambient_occlusion_strength: f32,
}

impl From<UnclampedRenderSettings> for RenderSettings {
    fn from(raw: UnclampedRenderSettings) -> Self {
        Self::new(
            raw.max_steps,
            raw.max_distance,
            raw.intersection_threshold,
            raw.ambient_occlusion_strength,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp() {
        let mut settings = RenderSettings::default();
        settings.set_max_steps(0);
        assert_eq!(settings.max_steps(), 1);
        settings.set_max_steps(5000);
        assert_eq!(settings.max_steps(), 1000);
        settings.set_max_distance(0.0);
        assert_eq!(settings.max_distance(), 1.0);
        settings.set_intersection_threshold(1.0);
        assert_eq!(settings.intersection_threshold(), 0.3);
        settings.set_ambient_occlusion_strength(f32::NAN);
        assert_eq!(settings.ambient_occlusion_strength(), 0.005);
    }

    #[test]
    fn deserialize_clamps() {
        let unclamped = bincode::serialize(&(0_u32, 1.0e6_f32, 0.001_f32, 0.5_f32)).unwrap();
        let settings: RenderSettings = bincode::deserialize(&unclamped).unwrap();
        assert_eq!(settings, RenderSettings::new(1, 10000.0, 0.001, 0.5));
    }
}
