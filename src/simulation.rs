use crate::settings::FieldSettings;
use crate::surface::Surface;
use crate::theme::ThemeSource;
use crate::vector2::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform value in [0, max), or 0 for an empty range
fn uniform<R: Rng>(rng: &mut R, max: f32) -> f32 {
    if max > 0.0 {
        rng.gen::<f32>() * max
    } else {
        0.0
    }
}

/// One simulated point
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector2,
    /// Rest position the particle relaxes toward
    pub base_position: Vector2,
    pub radius: f32,
    /// Scales how far the pointer pushes this particle
    pub density: f32,
    /// Constant per-frame drift
    pub velocity: Vector2,
}

impl Particle {
    /// Create a particle resting at (x, y) with random size, density and drift
    pub fn spawn<R: Rng>(rng: &mut R, settings: &FieldSettings, x: f32, y: f32) -> Self {
        let position = Vector2::new(x, y);
        let drift = settings.drift;
        Self {
            position,
            base_position: position,
            radius: settings.min_radius + uniform(rng, settings.max_radius - settings.min_radius),
            density: uniform(rng, settings.max_density) + 1.0,
            velocity: Vector2::new(
                uniform(rng, drift * 2.0) - drift,
                uniform(rng, drift * 2.0) - drift,
            ),
        }
    }

    /// Advance one frame: drift, pointer repulsion, relaxation, boundary re-seed
    pub fn update<R: Rng>(
        &mut self,
        pointer: Option<Vector2>,
        bounds: (f32, f32),
        settings: &FieldSettings,
        rng: &mut R,
    ) {
        self.position += self.velocity;

        if let Some(pointer) = pointer {
            let offset = pointer - self.position;
            let distance = offset.length();
            let radius = settings.interaction_radius;

            // Pointer sitting on the particle has no direction to push along
            if distance >= settings.min_distance && distance < radius {
                let direction = offset * (1.0 / distance);
                let force = (radius - distance) / radius;
                let push = direction * (force * self.density);
                self.position -= push * settings.push_strength;
            }
        }

        let to_rest = self.base_position - self.position;
        self.position += to_rest * settings.relaxation;

        let (width, height) = bounds;
        if self.position.x < 0.0 || self.position.x > width {
            self.base_position.x = uniform(rng, width);
        }
        if self.position.y < 0.0 || self.position.y > height {
            self.base_position.y = uniform(rng, height);
        }
    }
}

/// Pointer-reactive particle field
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Last pointer position in surface-local coordinates, None when outside
    pointer: Option<Vector2>,
    width: f32,
    height: f32,
    pub settings: FieldSettings,
    rng: StdRng,
}

impl ParticleField {
    pub fn new<S: Surface + ?Sized>(settings: FieldSettings, surface: &S) -> Self {
        Self::with_rng(settings, surface, StdRng::from_entropy())
    }

    pub fn with_rng<S: Surface + ?Sized>(settings: FieldSettings, surface: &S, rng: StdRng) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            pointer: None,
            width: 0.0,
            height: 0.0,
            settings,
            rng,
        };
        field.initialize(surface);
        field
    }

    /// Size the field to the surface and seed a fresh population
    pub fn initialize<S: Surface + ?Sized>(&mut self, surface: &S) {
        self.width = surface.width().max(0.0);
        self.height = surface.height().max(0.0);
        self.rebuild();
    }

    /// Surface changed size: rebuild everything from scratch
    pub fn on_resize<S: Surface + ?Sized>(&mut self, surface: &S) {
        self.initialize(surface);
        log::debug!(
            "particle field resized to {:.0}x{:.0} ({} particles)",
            self.width,
            self.height,
            self.particles.len()
        );
    }

    /// Replace every particle at the current dimensions
    pub fn rebuild(&mut self) {
        let count = self.settings.particle_count(self.width);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let x = uniform(&mut self.rng, self.width);
            let y = uniform(&mut self.rng, self.height);
            self.particles.push(Particle::spawn(&mut self.rng, &self.settings, x, y));
        }
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vector2::new(x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// Advance one frame and redraw the whole field
    pub fn tick<S, T>(&mut self, surface: &mut S, theme: &T)
    where
        S: Surface + ?Sized,
        T: ThemeSource + ?Sized,
    {
        surface.clear();

        let bounds = (self.width, self.height);
        for particle in &mut self.particles {
            particle.update(self.pointer, bounds, &self.settings, &mut self.rng);

            let color = theme.palette().particle_color();
            surface.fill_circle(particle.position.x, particle.position.y, particle.radius, color);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Option<Vector2> {
        self.pointer
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}
