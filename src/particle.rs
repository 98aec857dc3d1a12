use crate::vector::Vector2D;

/// How a particle's lifespan decreases on each call to [`Particle::age`].
///
/// Both policies are monotonically non-increasing and reach zero in a finite number of steps.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decay {
    /// Subtracts `step` from the lifespan.
    Linear {
        /// Amount removed on every tick.
        step: f64,
    },
    /// Multiplies the lifespan by `factor`, snapping it to zero once it falls below `cutoff`.
    Exponential {
        /// Multiplicative factor in `(0, 1)`.
        factor: f64,
        /// Lifespan under which the particle is considered expired.
        cutoff: f64,
    },
}

impl Default for Decay {
    fn default() -> Self {
        Decay::Linear { step: 1.0 }
    }
}

impl Decay {
    /// Returns the lifespan after one decay step.
    #[inline]
    pub fn apply(self, lifespan: f64) -> f64 {
        match self {
            Decay::Linear { step } => lifespan - step,
            Decay::Exponential { factor, cutoff } => {
                let next = lifespan * factor;
                if next < cutoff {
                    0.0
                } else {
                    next
                }
            }
        }
    }

    /// Number of [`apply`](Decay::apply) steps needed for `lifespan` to reach zero or less.
    pub fn ticks_to_expire(self, lifespan: f64) -> u64 {
        if lifespan <= 0.0 {
            return 0;
        }

        match self {
            Decay::Linear { step } => (lifespan / step).ceil() as u64,
            Decay::Exponential { factor, cutoff } => {
                if lifespan * factor < cutoff {
                    return 1;
                }
                // Smallest n such that lifespan * factor^n < cutoff.
                let n = ((cutoff / lifespan).ln() / factor.ln()).floor() as u64 + 1;
                n.max(1)
            }
        }
    }
}

/// A short-lived particle moving under accumulated forces.
///
/// Each tick, forces are accumulated with [`apply_force`](Particle::apply_force), consumed by
/// [`integrate`](Particle::integrate) and the particle [ages](Particle::age). The particle
/// is [dead](Particle::is_dead) once its lifespan reaches zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Current position.
    pub location: Vector2D,
    /// Current velocity, never longer than `max_speed` after integration.
    pub velocity: Vector2D,
    /// Forces accumulated since the last integration.
    pub acceleration: Vector2D,
    /// Diameter of the particle.
    pub size: f64,
    /// Maximum speed.
    pub max_speed: f64,
    /// Lifespan the particle was emitted with.
    pub lifespan_max: f64,
    /// Remaining lifespan.
    pub lifespan: f64,
    /// Direction of travel in screen space, updated on integration.
    pub heading: f64,
}

impl Particle {
    /// Creates a particle at rest acceleration-wise, with its lifespan set to `lifespan_max`.
    pub fn new(
        location: Vector2D,
        velocity: Vector2D,
        size: f64,
        max_speed: f64,
        lifespan_max: f64,
    ) -> Self {
        Self {
            location,
            velocity,
            acceleration: Vector2D::ZERO,
            size,
            max_speed,
            lifespan_max,
            lifespan: lifespan_max,
            heading: velocity.angle(),
        }
    }

    /// Accumulates `force` into the acceleration.
    #[inline]
    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration.add(force);
    }

    /// Advances the particle by one step and clears the accumulated acceleration.
    #[inline]
    pub fn integrate(&mut self) {
        self.velocity.add(self.acceleration);
        self.velocity.limit(self.max_speed);
        self.location.add(self.velocity);
        self.heading = self.velocity.angle();
        self.acceleration = Vector2D::ZERO;
    }

    /// Decreases the lifespan according to `decay`.
    #[inline]
    pub fn age(&mut self, decay: Decay) {
        self.lifespan = decay.apply(self.lifespan);
    }

    /// Returns true once the lifespan has run out.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lifespan <= 0.0
    }

    /// Half of the particle size.
    #[inline]
    pub fn half_size(&self) -> f64 {
        self.size / 2.0
    }
}
