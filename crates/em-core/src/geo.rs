//! Ground-plane position type and small vector helpers.
//!
//! The reaction and steering core works on the 2-D ground plane in metres.
//! Height is owned by the physics/terrain layer and never consulted here.

/// A point on the ground plane, in metres, stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance: use for comparisons to skip the square root.
    #[inline]
    pub fn distance_squared(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// `true` if both coordinates are finite (no NaN / infinity).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The point `distance` metres from `self`, directly away from `threat`.
    ///
    /// If `self` and `threat` coincide there is no meaningful direction; the
    /// result then lies along +x so callers always get a usable target.
    pub fn away_from(self, threat: Position, distance: f32) -> Position {
        let dx = self.x - threat.x;
        let dy = self.y - threat.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len <= f32::EPSILON {
            return Position::new(self.x + distance, self.y);
        }
        Position::new(self.x + dx / len * distance, self.y + dy / len * distance)
    }

    /// The point `distance` metres short of `target` on the line from `self`.
    ///
    /// Returns `self` when already within `distance` of `target`.
    pub fn short_of(self, target: Position, distance: f32) -> Position {
        let len = self.distance(target);
        if len <= distance {
            return self;
        }
        self.lerp(target, (len - distance) / len)
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Position, t: f32) -> Position {
        Position::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Heading from `self` towards `other` in radians (`atan2(dy, dx)`).
    #[inline]
    pub fn heading_to(self, other: Position) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Position {
    fn from(a: [f32; 2]) -> Self {
        Position::new(a[0], a[1])
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
