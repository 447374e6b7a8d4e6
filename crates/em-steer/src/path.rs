//! Control points and the paths they form.

use em_core::Position;

/// A waypoint with the motion parameters steering should have when it
/// reaches it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteeringControlPoint {
    pub position: Position,
    /// Target speed at this point, metres per second.
    pub speed:    f32,
    /// Desired heading in radians, if the planner fixed one.
    pub heading:  Option<f32>,
}

impl SteeringControlPoint {
    #[inline]
    pub fn new(position: Position, speed: f32) -> Self {
        Self { position, speed, heading: None }
    }

    #[inline]
    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = Some(heading);
        self
    }
}

/// An ordered sequence of control points, first to last.
///
/// Owned by the entity's [`Navigator`][crate::Navigator] and replaced on
/// every planning cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub points: Vec<SteeringControlPoint>,
}

impl Path {
    pub fn new(points: Vec<SteeringControlPoint>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<&SteeringControlPoint> {
        self.points.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&SteeringControlPoint> {
        self.points.last()
    }

    /// Keep the first `len` points.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.points.truncate(len);
    }

    #[inline]
    pub fn push(&mut self, point: SteeringControlPoint) {
        self.points.push(point);
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.points.iter().map(|p| p.position)
    }

    /// Sum of the straight segments between consecutive points, metres.
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].position.distance(w[1].position))
            .sum()
    }
}

impl FromIterator<SteeringControlPoint> for Path {
    fn from_iter<I: IntoIterator<Item = SteeringControlPoint>>(iter: I) -> Self {
        Path { points: iter.into_iter().collect() }
    }
}
