use serde::{Deserialize, Serialize};

/// Upper bound on either population size
pub const MAX_PARTICLES: usize = 2000;

/// All particle field tunables consolidated into one struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    // === Population ===
    /// Particle count for surfaces narrower than `width_threshold`
    pub small_count: usize,
    /// Particle count for surfaces at least `width_threshold` wide
    pub large_count: usize,
    /// Width (logical pixels) separating the small and large populations
    pub width_threshold: f32,

    // === Pointer Interaction ===
    /// Distance within which the pointer repels particles (10-400)
    pub interaction_radius: f32,
    /// Multiplier applied to the push vector (0.5-10.0)
    pub push_strength: f32,
    /// Below this distance the pointer is treated as sitting on the particle
    /// and repulsion is skipped
    pub min_distance: f32,

    // === Motion ===
    /// Fraction of the remaining distance to the rest position covered per frame (0.01-0.5)
    pub relaxation: f32,
    /// Per-axis drift speeds are drawn from [-drift, drift)
    pub drift: f32,

    // === Particle Shape ===
    /// Radius range in logical pixels, [min_radius, max_radius)
    pub min_radius: f32,
    pub max_radius: f32,
    /// Density is drawn from [1, 1 + max_density)
    pub max_density: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            small_count: 50,
            large_count: 100,
            width_threshold: 768.0,

            interaction_radius: 150.0,
            push_strength: 3.0,
            min_distance: 1e-3,

            relaxation: 0.05,
            drift: 0.25,

            min_radius: 1.0,
            max_radius: 4.0,
            max_density: 30.0,
        }
    }
}

impl FieldSettings {
    /// Number of particles to seed for a surface of the given width
    pub fn particle_count(&self, surface_width: f32) -> usize {
        if surface_width < self.width_threshold {
            self.small_count
        } else {
            self.large_count
        }
    }

    /// Adjust interaction radius within bounds
    pub fn adjust_interaction_radius(&mut self, delta: f32) {
        self.interaction_radius = (self.interaction_radius + delta).clamp(10.0, 400.0);
    }

    /// Adjust push strength within bounds
    pub fn adjust_push_strength(&mut self, delta: f32) {
        self.push_strength = (self.push_strength + delta).clamp(0.5, 10.0);
    }

    /// Adjust relaxation rate within bounds
    pub fn adjust_relaxation(&mut self, delta: f32) {
        self.relaxation = (self.relaxation + delta).clamp(0.01, 0.5);
    }

    /// Bring every field back into a usable range after loading from disk
    pub fn sanitized(mut self) -> Self {
        self.small_count = self.small_count.clamp(1, MAX_PARTICLES);
        self.large_count = self.large_count.clamp(1, MAX_PARTICLES);
        self.interaction_radius = self.interaction_radius.clamp(10.0, 400.0);
        self.push_strength = self.push_strength.clamp(0.5, 10.0);
        self.relaxation = self.relaxation.clamp(0.01, 0.5);
        self.min_distance = self.min_distance.max(f32::EPSILON);
        self.drift = self.drift.abs();
        self.min_radius = self.min_radius.max(0.1);
        if self.max_radius <= self.min_radius {
            self.max_radius = self.min_radius + 1.0;
        }
        self.max_density = self.max_density.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_count_threshold() {
        let settings = FieldSettings::default();
        assert_eq!(settings.particle_count(0.0), 50);
        assert_eq!(settings.particle_count(767.9), 50);
        assert_eq!(settings.particle_count(768.0), 100);
        assert_eq!(settings.particle_count(1920.0), 100);
    }

    #[test]
    fn test_adjustments_are_clamped() {
        let mut settings = FieldSettings::default();

        settings.adjust_interaction_radius(1000.0);
        assert_eq!(settings.interaction_radius, 400.0);
        settings.adjust_interaction_radius(-1000.0);
        assert_eq!(settings.interaction_radius, 10.0);

        settings.adjust_relaxation(-1.0);
        assert_eq!(settings.relaxation, 0.01);

        settings.adjust_push_strength(20.0);
        assert_eq!(settings.push_strength, 10.0);
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let settings = FieldSettings {
            min_distance: 0.0,
            drift: -0.5,
            min_radius: 3.0,
            max_radius: 2.0,
            relaxation: 2.0,
            ..Default::default()
        }
        .sanitized();

        assert!(settings.min_distance > 0.0);
        assert_eq!(settings.drift, 0.5);
        assert!(settings.max_radius > settings.min_radius);
        assert_eq!(settings.relaxation, 0.5);
    }

    #[test]
    fn test_sanitized_bounds_particle_counts() {
        let settings = FieldSettings {
            small_count: 0,
            large_count: usize::MAX,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(settings.small_count, 1);
        assert_eq!(settings.large_count, MAX_PARTICLES);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: FieldSettings = serde_json::from_str(r#"{"interaction_radius": 90.0}"#).unwrap();
        assert_eq!(settings.interaction_radius, 90.0);
        assert_eq!(settings.small_count, 50);
        assert_eq!(settings.relaxation, 0.05);
    }
}
