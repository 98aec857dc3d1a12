use std::fmt;

use crate::{
    math::{clamp, Norm},
    particle::Particle,
    vector::Vector2D,
};

/// Stable identifier of a [`ForceField`] inside a [`World`](crate::world::World).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub(crate) u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction of the force exerted by a [`ForceField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Pulls particles towards the field.
    Attractor,
    /// Pushes particles away from the field.
    Repeller,
}

impl Polarity {
    /// `+1` for attractors, `-1` for repellers.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Attractor => 1.0,
            Polarity::Repeller => -1.0,
        }
    }
}

/// Range into which the particle-to-field distance is clamped before applying the inverse-square
/// law.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DistanceBounds {
    /// Lower bound, removing the singularity at distance zero.
    pub min: f64,
    /// Upper bound, below which the force never becomes negligible.
    pub max: f64,
}

impl Default for DistanceBounds {
    fn default() -> Self {
        Self {
            min: 5.0,
            max: 1000.0,
        }
    }
}

/// A point source of signed, distance-clamped inverse-square force.
///
/// ```
/// # use attractors::prelude::*;
/// let field = ForceField::new(FieldId::default(), Polarity::Attractor, Vector2D::ZERO, 500.0);
/// let force = field.force_on(Vector2D::new(100.0, 0.0), DistanceBounds::default());
///
/// assert!((force.x + 500.0 / (100.0 * 100.0)).abs() < 1E-12);
/// assert_eq!(force.y, 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ForceField {
    id: FieldId,
    polarity: Polarity,
    /// Position of the field.
    pub location: Vector2D,
    /// Strength of the field, scaled by the polarity sign.
    pub strength: f64,
}

impl ForceField {
    /// Creates a new force field.
    pub fn new(id: FieldId, polarity: Polarity, location: Vector2D, strength: f64) -> Self {
        Self {
            id,
            polarity,
            location,
            strength,
        }
    }

    /// Identifier of the field.
    #[inline]
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Polarity of the field.
    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Force exerted by the field on something located at `location`, using exact lengths.
    #[inline]
    pub fn force_on(&self, location: Vector2D, bounds: DistanceBounds) -> Vector2D {
        self.force_on_with(Norm::Exact, location, bounds)
    }

    /// Force exerted by the field on `particle`.
    #[inline]
    pub fn force_on_particle(&self, particle: &Particle, bounds: DistanceBounds) -> Vector2D {
        self.force_on(particle.location, bounds)
    }

    /// Force exerted by the field on something located at `location`, computing lengths with
    /// the given [`Norm`].
    ///
    /// The direction points from `location` towards the field; the distance is clamped into
    /// `bounds` before the inverse-square law is applied.
    #[inline]
    pub fn force_on_with(
        &self,
        norm: Norm,
        location: Vector2D,
        bounds: DistanceBounds,
    ) -> Vector2D {
        let mut dir = Vector2D::subtract(self.location, location);

        let length = norm.length(dir);
        if length != 0.0 && length != 1.0 {
            dir.scale(length.recip());
        }

        let distance = clamp(length, bounds.min, bounds.max);
        let magnitude = self.polarity.sign() * self.strength / (distance * distance);

        dir.scale(magnitude);
        dir
    }
}
