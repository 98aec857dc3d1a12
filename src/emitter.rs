use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{
    config::{Bounds, EmitterConfig, ParticleConfig},
    particle::Particle,
    vector::Vector2D,
};

/// Produces new [`Particles`](Particle) with randomized initial state.
///
/// Particles are spawned along a horizontal line centered on the configured anchor, with a
/// velocity drawn around the configured direction.
///
/// ```
/// # use attractors::{config::Config, emitter::Emitter};
/// let config = Config::default();
/// let mut emitter = Emitter::seeded(42);
///
/// let particles = emitter.emit(10, &config.emitter, &config.particle);
///
/// assert_eq!(particles.len(), 10);
/// assert!(particles.iter().all(|p| p.lifespan == p.lifespan_max));
/// ```
#[derive(Clone, Debug)]
pub struct Emitter {
    rng: StdRng,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// Creates an emitter seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an emitter producing a reproducible sequence of particles.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Emits `count` new particles.
    pub fn emit(
        &mut self,
        count: usize,
        emitter: &EmitterConfig,
        particle: &ParticleConfig,
    ) -> Vec<Particle> {
        (0..count).map(|_| self.emit_one(emitter, particle)).collect()
    }

    fn emit_one(&mut self, emitter: &EmitterConfig, particle: &ParticleConfig) -> Particle {
        let half_width = emitter.width / 2.0;
        let x = emitter.anchor_x + self.rng.gen_range(-half_width..=half_width);
        let location = Vector2D::new(x, emitter.anchor_y);

        let mut velocity = emitter.direction;
        velocity.add_xy(
            self.gaussian() * emitter.spread,
            self.gaussian() * emitter.spread,
        );

        let size = self.draw(particle.size);
        let lifespan_max = self.draw(particle.lifespan);

        Particle::new(location, velocity, size, particle.max_speed, lifespan_max)
    }

    #[inline]
    fn gaussian(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    #[inline]
    fn draw(&mut self, bounds: Bounds) -> f64 {
        if bounds.min == bounds.max {
            bounds.min
        } else {
            self.rng.gen_range(bounds.min..=bounds.max)
        }
    }
}
