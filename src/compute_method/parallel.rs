use super::{ComputeMethod, ParticleSystem};
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

/// Brute-force [`ComputeMethod`] using the CPU in parallel with
/// [rayon](https://github.com/rayon-rs/rayon).
///
/// Each worker only writes to the particles it was handed and reads the shared force fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce;

impl ComputeMethod<ParticleSystem<'_>> for BruteForce {
    type Output = usize;

    #[inline]
    fn compute(&mut self, system: ParticleSystem) -> Self::Output {
        let forces = system.forces;

        system
            .particles
            .par_iter_mut()
            .map(|particle| forces.advance(particle))
            .filter(|&expired| expired)
            .count()
    }
}
