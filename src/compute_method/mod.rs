use crate::{
    force_field::{DistanceBounds, ForceField},
    math::Norm,
    particle::{Decay, Particle},
    vector::Vector2D,
};

/// Compute methods that use multiple CPU threads.
#[cfg(feature = "parallel")]
pub mod parallel;

/// Compute methods that use one CPU thread.
pub mod sequential;

/// Compute method used by [`World::tick`](crate::world::World::tick).
#[cfg(feature = "parallel")]
pub type DefaultMethod = parallel::BruteForce;

/// Compute method used by [`World::tick`](crate::world::World::tick).
#[cfg(not(feature = "parallel"))]
pub type DefaultMethod = sequential::BruteForce;

/// Trait to perform a computation over objects contained in a storage of type `Storage`.
///
/// The built-in methods take a [`ParticleSystem`] and run the per-particle part of a tick
/// (accumulate forces, integrate, age), returning the number of particles that expired.
///
/// # Example
///
/// ```
/// # use attractors::prelude::*;
/// struct Frozen;
///
/// impl ComputeMethod<ParticleSystem<'_>> for Frozen {
///     type Output = usize;
///
///     fn compute(&mut self, system: ParticleSystem) -> usize {
///         // Particles never move, they only age.
///         let decay = system.forces.decay;
///         system
///             .particles
///             .iter_mut()
///             .map(|p| {
///                 p.age(decay);
///                 p.is_dead()
///             })
///             .filter(|&dead| dead)
///             .count()
///     }
/// }
/// ```
pub trait ComputeMethod<Storage> {
    /// Result of the computation.
    type Output;

    /// Performs the computation on the objects contained in the storage.
    fn compute(&mut self, storage: Storage) -> Self::Output;
}

impl<C, S> ComputeMethod<S> for &mut C
where
    C: ComputeMethod<S>,
{
    type Output = C::Output;

    #[inline]
    fn compute(&mut self, storage: S) -> Self::Output {
        (**self).compute(storage)
    }
}

/// Read-only snapshot of everything acting on particles during one tick.
///
/// It is shared by reference between workers; force fields cannot change while it is alive.
#[derive(Clone, Copy, Debug)]
pub struct Forces<'a> {
    /// Force fields, read once per tick.
    pub fields: &'a [ForceField],
    /// Constant force applied to every particle.
    pub global_force: Vector2D,
    /// Distance clamping of the force fields.
    pub bounds: DistanceBounds,
    /// Length computation used by the force law.
    pub norm: Norm,
    /// Lifespan decay policy.
    pub decay: Decay,
}

impl Forces<'_> {
    /// Sum of the global force and of every field's force at `location`.
    #[inline]
    pub fn total_at(&self, location: Vector2D) -> Vector2D {
        self.fields.iter().fold(self.global_force, |mut total, field| {
            total.add(field.force_on_with(self.norm, location, self.bounds));
            total
        })
    }

    /// Runs the per-particle steps of a tick on a single particle and returns true if it expired.
    ///
    /// Particles never read each other's state, so this can run on any number of particles
    /// concurrently.
    #[inline]
    pub fn advance(&self, particle: &mut Particle) -> bool {
        particle.apply_force(self.total_at(particle.location));
        particle.integrate();
        particle.age(self.decay);
        particle.is_dead()
    }
}

/// Storage handed to [`ComputeMethods`](ComputeMethod) by the world on every tick.
#[derive(Debug)]
pub struct ParticleSystem<'a> {
    /// Particle population, mutated in place.
    pub particles: &'a mut [Particle],
    /// What acts on the particles.
    pub forces: Forces<'a>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::force_field::{FieldId, Polarity};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const EPSILON: f64 = 1E-9;

    fn forces(fields: &[ForceField], global_force: Vector2D) -> Forces<'_> {
        Forces {
            fields,
            global_force,
            bounds: DistanceBounds::default(),
            norm: Norm::Exact,
            decay: Decay::default(),
        }
    }

    fn random_particles(rng: &mut StdRng, n: usize) -> Vec<Particle> {
        let mut gen = |range: std::ops::Range<f64>| rng.gen_range(range);

        (0..n)
            .map(|_| {
                Particle::new(
                    Vector2D::new(gen(0.0..1000.0), gen(0.0..700.0)),
                    Vector2D::new(gen(-2.0..2.0), gen(-2.0..2.0)),
                    5.0,
                    4.0,
                    gen(1.0..20.0).floor(),
                )
            })
            .collect()
    }

    pub fn matches_reference<C>(mut cm: C)
    where
        for<'a> C: ComputeMethod<ParticleSystem<'a>, Output = usize>,
    {
        let mut rng = StdRng::seed_from_u64(0xFACE);
        let fields = [
            ForceField::new(FieldId(0), Polarity::Attractor, Vector2D::new(500.0, 500.0), 500.0),
            ForceField::new(FieldId(1), Polarity::Repeller, Vector2D::new(500.0, 610.0), 800.0),
            ForceField::new(FieldId(2), Polarity::Attractor, Vector2D::new(20.0, 20.0), 50.0),
        ];
        let forces = forces(&fields, Vector2D::new(0.0, 0.02));

        let mut particles = random_particles(&mut rng, 257);
        let mut expected = particles.clone();

        let mut expected_dead = 0;
        for p in expected.iter_mut() {
            let mut total = forces.global_force;
            for field in &fields {
                total.add(field.force_on_particle(p, forces.bounds));
            }
            p.apply_force(total);
            p.integrate();
            p.age(forces.decay);
            expected_dead += p.is_dead() as usize;
        }

        let dead = cm.compute(ParticleSystem {
            particles: &mut particles,
            forces,
        });

        assert_eq!(dead, expected_dead);
        for (computed, expected) in particles.iter().zip(&expected) {
            assert!(Vector2D::subtract(computed.location, expected.location).magnitude() < EPSILON);
            assert!(Vector2D::subtract(computed.velocity, expected.velocity).magnitude() < EPSILON);
            assert_eq!(computed.acceleration, Vector2D::ZERO);
            assert_eq!(computed.lifespan, expected.lifespan);
        }
    }

    pub fn uniform_acceleration<C>(mut cm: C)
    where
        for<'a> C: ComputeMethod<ParticleSystem<'a>, Output = usize>,
    {
        const TICKS: u32 = 50;
        let g = Vector2D::new(0.1, -0.25);
        let forces = forces(&[], g);

        let mut particles = vec![Particle::new(
            Vector2D::ZERO,
            Vector2D::ZERO,
            1.0,
            f64::INFINITY,
            1000.0,
        )];

        for _ in 0..TICKS {
            cm.compute(ParticleSystem {
                particles: &mut particles,
                forces,
            });
        }

        let t = TICKS as f64;
        let p = &particles[0];
        assert!((p.velocity.x - t * g.x).abs() < EPSILON);
        assert!((p.velocity.y - t * g.y).abs() < EPSILON);
        assert!((p.location.x - g.x * t * (t + 1.0) / 2.0).abs() < EPSILON);
        assert!((p.location.y - g.y * t * (t + 1.0) / 2.0).abs() < EPSILON);
    }

    pub fn speed_limit_holds<C>(mut cm: C)
    where
        for<'a> C: ComputeMethod<ParticleSystem<'a>, Output = usize>,
    {
        let mut rng = StdRng::seed_from_u64(11);
        let fields = [ForceField::new(
            FieldId(0),
            Polarity::Attractor,
            Vector2D::new(500.0, 350.0),
            1E6,
        )];
        let forces = forces(&fields, Vector2D::new(0.0, 3.0));
        let mut particles = random_particles(&mut rng, 100);

        for _ in 0..10 {
            cm.compute(ParticleSystem {
                particles: &mut particles,
                forces,
            });
            for p in &particles {
                assert!(p.velocity.magnitude() <= p.max_speed * (1.0 + 1E-12));
            }
        }
    }

    #[test]
    fn total_at_sums_fields_and_global_force() {
        let fields = [
            ForceField::new(FieldId(0), Polarity::Attractor, Vector2D::new(0.0, 0.0), 100.0),
            ForceField::new(FieldId(1), Polarity::Repeller, Vector2D::new(0.0, 0.0), 100.0),
        ];
        let g = Vector2D::new(0.5, 0.5);

        // Opposite fields at the same spot cancel out.
        let total = forces(&fields, g).total_at(Vector2D::new(10.0, 0.0));
        assert!(Vector2D::subtract(total, g).magnitude() < EPSILON);
    }
}
