use crate::physics::math::{GridPoint, Vector, to_grid};
use crate::utils::color::gradient;
use bevy::color::Srgba;
use std::collections::VecDeque;

/// Upper bound on points reserved up front; longer trails grow on demand
const MAX_RESERVED_POINTS: usize = 1024;

/// Bounded history of a body's recent positions, oldest first.
///
/// Points are rounded to the integer grid when recorded. Once `capacity` points
/// are held, each new point evicts the oldest one. The capacity is fixed when
/// the trail is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<GridPoint>,
    capacity: usize,
    pub color: Srgba,
}

impl Trail {
    pub fn new(capacity: usize, color: Srgba) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.saturating_add(1).min(MAX_RESERVED_POINTS)),
            capacity,
            color,
        }
    }

    pub fn record(&mut self, position: Vector) {
        self.points.push_back(to_grid(position));

        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Points in chronological order, oldest first
    pub fn points(&self) -> impl ExactSizeIterator<Item = &GridPoint> + DoubleEndedIterator {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<GridPoint> {
        self.points.back().copied()
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
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// One colour per line segment, newest segment first, fading from the trail
    /// colour toward `fade_to` across the full capacity of the trail.
    pub fn segment_colors(&self, fade_to: Srgba) -> Vec<Srgba> {
        let segments = self.points.len().saturating_sub(1);
        (0..segments)
            .map(|segment| gradient(self.color, fade_to, self.capacity, segment))
            .collect()
    }
}
