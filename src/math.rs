use crate::vector::Vector2D;

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`], this does not panic when `min > max`; `min` wins in that case.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

const INV_SQRT_MAGIC: u64 = 0x5fe6_ec85_e7de_30da;

/// Approximates `1 / sqrt(x)` with the bit-level magic constant trick and a single Newton
/// iteration.
///
/// The relative error stays below `0.2%` for positive normal inputs.
#[inline]
pub fn fast_inv_sqrt(x: f64) -> f64 {
    let half = 0.5 * x;
    let i = INV_SQRT_MAGIC.wrapping_sub(x.to_bits() >> 1);
    let y = f64::from_bits(i);
    y * (1.5 - half * y * y)
}

/// Strategy used to compute vector lengths in the force computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    /// Exact square root.
    #[default]
    Exact,
    /// [`fast_inv_sqrt`] approximation, cheaper but slightly inaccurate.
    FastInverseSqrt,
}

impl Norm {
    /// Length of `v` according to this strategy.
    #[inline]
    pub fn length(self, v: Vector2D) -> f64 {
        match self {
            Norm::Exact => v.magnitude(),
            Norm::FastInverseSqrt => {
                let sq = v.magnitude_squared();
                if sq == 0.0 {
                    0.0
                } else {
                    1.0 / fast_inv_sqrt(sq)
                }
            }
        }
    }
}
