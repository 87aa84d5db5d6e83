// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion tracking for a single contact: per-move deltas, cumulative travel and net offset.
//!
//! ## Usage
//!
//! 1) Create a [`Motion`] with the contact's initial event-space position.
//! 2) On each move, call [`Motion::update`] to get the delta since the previous sample.
//! 3) Query [`Motion::total`] for cumulative per-axis travel (used for click and
//!    axis classification) or [`Motion::diff`] for the net offset from the start.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::motion::Motion;
//!
//! let mut motion = Motion::new(Point::new(40.0, 8.0));
//!
//! // Forward then back: net offset is zero, but travel accumulates.
//! motion.update(Point::new(46.0, 8.0));
//! motion.update(Point::new(40.0, 8.0));
//!
//! assert_eq!(motion.diff(), Vec2::ZERO);
//! assert_eq!(motion.total(), Vec2::new(12.0, 0.0));
//! ```

use kurbo::{Point, Vec2};

/// Displacement state of one contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    start: Point,
    last: Point,
    delta: Vec2,
    total: Vec2,
}

impl Motion {
    /// Start tracking at `pos`.
    pub fn new(pos: Point) -> Self {
        Self {
            start: pos,
            last: pos,
            delta: Vec2::ZERO,
            total: Vec2::ZERO,
        }
    }

    /// Record a new position and return the delta since the previous one.
    pub fn update(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last;
        self.delta = delta;
        self.total += Vec2::new(delta.x.abs(), delta.y.abs());
        self.last = pos;
        delta
    }

    /// Position at creation.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Position at the most recent update.
    pub fn last(&self) -> Point {
        self.last
    }

    /// Delta produced by the most recent update.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Cumulative absolute travel per axis.
    pub fn total(&self) -> Vec2 {
        self.total
    }

    /// Net offset from start to the most recent position.
    pub fn diff(&self) -> Vec2 {
        self.last - self.start
    }

    /// Whether the contact travelled less than `slop` on both axes.
    pub fn within(&self, slop: f64) -> bool {
        self.total.x < slop && self.total.y < slop
    }

    /// Whether vertical travel dominates horizontal travel.
    pub fn is_vertical(&self) -> bool {
        self.total.y > self.total.x
    }
}
