use crate::{config::Config, math::clamp};

/// Straight (non-premultiplied) RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Opacity.
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation between `self` and `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

/// Gradient stops from an expired particle (offset 0) to a freshly emitted one (offset 1).
const STOPS: [(f32, Rgba); 4] = [
    (0.0, Rgba::TRANSPARENT),
    (0.3, Rgba::RED),
    (0.9, Rgba::YELLOW),
    (1.0, Rgba::WHITE),
];

fn sample_gradient(t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    for window in STOPS.windows(2) {
        let (t0, c0) = window[0];
        let (t1, c1) = window[1];
        if t <= t1 {
            return c0.lerp(c1, (t - t0) / (t1 - t0));
        }
    }
    STOPS[STOPS.len() - 1].1
}

/// Visual appearance of a particle for one lifespan bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// Color at the center of the particle, fading out radially.
    pub color: Rgba,
    /// Radius of the radial gradient.
    pub radius: f64,
}

/// Precomputed lookup from a lifespan bucket to an [`Appearance`].
///
/// Entry `0` is the appearance of a particle about to expire, the last entry the one of a
/// freshly emitted particle.
#[derive(Clone, Debug, PartialEq)]
pub struct AppearanceTable {
    entries: Vec<Appearance>,
}

impl AppearanceTable {
    /// Builds a table of `len` entries for particles of the given size.
    pub fn new(len: usize, particle_size: f64) -> Self {
        let len = len.max(1);
        let last = (len - 1).max(1) as f32;
        let entries = (0..len)
            .map(|i| Appearance {
                color: sample_gradient(if len == 1 { 1.0 } else { i as f32 / last }),
                radius: particle_size,
            })
            .collect();

        Self { entries }
    }

    /// Builds the table matching a configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.appearance_len(), config.particle.size.max)
    }

    /// Bucket of a particle with the given lifespan: `clamp(lifespan, 0, len - 1)`.
    #[inline]
    pub fn index(&self, lifespan: f64) -> usize {
        clamp(lifespan.floor(), 0.0, (self.entries.len() - 1) as f64) as usize
    }

    /// Appearance of a bucket, if it exists.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Appearance> {
        self.entries.get(index)
    }

    /// Number of buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a table has at least one bucket.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the buckets, from expiring to fresh.
    pub fn iter(&self) -> impl Iterator<Item = &Appearance> {
        self.entries.iter()
    }
}
