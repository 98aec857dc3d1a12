use super::{ComputeMethod, ParticleSystem};

/// Brute-force [`ComputeMethod`] using the CPU.
///
/// Every particle sums the force of every field, so a tick costs `O(particles × fields)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce;

impl ComputeMethod<ParticleSystem<'_>> for BruteForce {
    type Output = usize;

    #[inline]
    fn compute(&mut self, system: ParticleSystem) -> Self::Output {
        let forces = system.forces;

        system
            .particles
            .iter_mut()
            .map(|particle| forces.advance(particle))
            .filter(|&expired| expired)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests;
    use super::*;

    #[test]
    fn brute_force() {
        tests::matches_reference(BruteForce);
    }

    #[test]
    fn brute_force_uniform_acceleration() {
        tests::uniform_acceleration(BruteForce);
    }

    #[test]
    fn brute_force_speed_limit() {
        tests::speed_limit_holds(BruteForce);
    }
}
