use glam::DVec2;

/// Mutable two-dimensional vector.
///
/// [`add`](Vector2D::add), [`add_xy`](Vector2D::add_xy), [`scale`](Vector2D::scale),
/// [`normalize`](Vector2D::normalize) and [`limit`](Vector2D::limit) mutate the receiver in place,
/// while [`subtract`](Vector2D::subtract) is an associated function returning a fresh value and
/// leaving both operands untouched.
///
/// ```
/// # use attractors::vector::Vector2D;
/// let a = Vector2D::new(3.0, 4.0);
/// let b = Vector2D::new(1.0, 1.0);
///
/// let mut dir = Vector2D::subtract(a, b);
/// dir.scale(2.0);
///
/// assert_eq!(dir, Vector2D::new(4.0, 6.0));
/// assert_eq!(a, Vector2D::new(3.0, 4.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector2D {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component, growing downwards in screen space.
    pub y: f64,
}

impl Vector2D {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Adds `v` to this vector.
    #[inline]
    pub fn add(&mut self, v: Vector2D) {
        self.x += v.x;
        self.y += v.y;
    }

    /// Adds the given components to this vector.
    #[inline]
    pub fn add_xy(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Multiplies both components by `n`.
    #[inline]
    pub fn scale(&mut self, n: f64) {
        self.x *= n;
        self.y *= n;
    }

    /// Euclidean norm of the vector.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Squared Euclidean norm, avoiding the square root.
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Scales the vector to unit length.
    ///
    /// Vectors of magnitude `0` or `1` are left unchanged, so normalizing never produces `NaN`.
    #[inline]
    pub fn normalize(&mut self) {
        let m = self.magnitude();
        if m != 0.0 && m != 1.0 {
            self.x /= m;
            self.y /= m;
        }
    }

    /// Clamps the magnitude of the vector to `max`.
    #[inline]
    pub fn limit(&mut self, max: f64) {
        if self.magnitude() > max {
            self.normalize();
            self.scale(max);
        }
    }

    /// Direction of the vector in screen space (y axis pointing down).
    ///
    /// Callers working with a y-up convention must negate the result.
    #[inline]
    pub fn angle(&self) -> f64 {
        -(-self.y).atan2(self.x)
    }

    /// Returns `a - b` without modifying either operand.
    #[inline]
    pub fn subtract(a: Vector2D, b: Vector2D) -> Vector2D {
        Vector2D::new(a.x - b.x, a.y - b.y)
    }

    /// Returns true if both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Vector2D {
    #[inline]
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2D> for DVec2 {
    #[inline]
    fn from(v: Vector2D) -> Self {
        DVec2::new(v.x, v.y)
    }
}

impl From<[f64; 2]> for Vector2D {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2D> for [f64; 2] {
    #[inline]
    fn from(v: Vector2D) -> Self {
        [v.x, v.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1E-12;

    #[test]
    fn normalize_zero_vector_is_noop() {
        let mut v = Vector2D::ZERO;
        v.normalize();

        assert_eq!(v, Vector2D::ZERO);
    }

    #[test]
    fn normalize_unit_vector_is_noop() {
        for mut v in [Vector2D::new(1.0, 0.0), Vector2D::new(0.0, -1.0)] {
            let before = v;
            v.normalize();
            assert_eq!(v, before);
        }
    }

    #[test]
    fn normalize_yields_unit_length() {
        let mut v = Vector2D::new(3.0, -4.0);
        v.normalize();

        assert!((v.magnitude() - 1.0).abs() < EPSILON);
        assert!((v.x - 0.6).abs() < EPSILON);
        assert!((v.y + 0.8).abs() < EPSILON);
    }

    #[test]
    fn limit_clamps_only_above_max() {
        let mut long = Vector2D::new(30.0, 40.0);
        long.limit(5.0);
        assert!((long.magnitude() - 5.0).abs() < EPSILON);

        let mut short = Vector2D::new(1.0, 1.0);
        short.limit(5.0);
        assert_eq!(short, Vector2D::new(1.0, 1.0));
    }

    #[test]
    fn subtract_does_not_alias_operands() {
        let a = Vector2D::new(5.0, 5.0);
        let b = Vector2D::new(2.0, 1.0);

        let mut c = Vector2D::subtract(a, b);
        c.add_xy(1.0, 1.0);

        assert_eq!(c, Vector2D::new(4.0, 5.0));
        assert_eq!(a, Vector2D::new(5.0, 5.0));
        assert_eq!(b, Vector2D::new(2.0, 1.0));
    }

    #[test]
    fn angle_uses_screen_convention() {
        // Pointing down the screen (positive y) is a quarter turn clockwise.
        let down = Vector2D::new(0.0, 1.0);
        assert!((down.angle() - std::f64::consts::FRAC_PI_2).abs() < EPSILON);

        let right = Vector2D::new(1.0, 0.0);
        assert_eq!(right.angle(), 0.0);
    }

    #[test]
    fn glam_conversion() {
        let v = Vector2D::new(1.5, -2.0);
        let d: DVec2 = v.into();

        assert_eq!(d, DVec2::new(1.5, -2.0));
        assert_eq!(Vector2D::from(d), v);
    }
}
