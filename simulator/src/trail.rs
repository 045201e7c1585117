//! Bounded position history, used to draw the path a body leaves behind.

use euclid::default::Point3D;

use std::collections::VecDeque;

/// How many past positions a body remembers.
pub const TRAIL_LENGTH: usize = 200;

/// A fixed-capacity history of positions.
/// Pushing past the capacity voids the oldest sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    points: VecDeque<Point3D<f64>>,
    capacity: usize,
}

impl Trail {
    /// Make an empty trail holding at most `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Remember a new position.
    pub fn push(&mut self, point: Point3D<f64>) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            // too long! Void the oldest please.
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recently pushed position, if any.
    pub fn latest(&self) -> Option<Point3D<f64>> {
        self.points.back().copied()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Point3D<f64>> + '_ {
        self.points.iter()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Trail::with_capacity(TRAIL_LENGTH)
    }
}
