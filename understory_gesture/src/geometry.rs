// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-contact geometry: distance, angle, and the scale/rotation derived from them.
//!
//! A pair of contacts is sampled on every paired move. The first usable sample
//! after the pair forms becomes the *formation baseline*; no transform is
//! reported for it. Each later sample yields a cumulative transform relative to
//! the baseline and an incremental transform relative to the previous sample.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::geometry::{PairUpdate, PinchState};
//!
//! let mut pinch = PinchState::default();
//! let a = Point::new(0.0, 0.0);
//!
//! assert_eq!(pinch.update(a, Point::new(10.0, 0.0)), PairUpdate::Seeded);
//! assert_eq!(pinch.update(a, Point::new(20.0, 0.0)), PairUpdate::Updated);
//! assert!((pinch.current().scale - 2.0).abs() < 1e-12);
//! ```

use core::f64::consts::TAU;

use kurbo::Point;

/// Euclidean distance between two contacts.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Direction from `a` to `b` in degrees, normalized to `[0, 360)`.
pub fn angle(a: Point, b: Point) -> f64 {
    let mut radians = (b - a).atan2();
    if radians < 0.0 {
        radians += TAU;
    }
    radians.to_degrees()
}

/// Transform reported to `scale`/`rotate` handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pinch {
    /// Current distance divided by the distance at formation.
    pub scale: f64,
    /// Current distance divided by the previous sample's distance.
    pub scale_delta: f64,
    /// Angle change since formation, in degrees.
    pub rotation: f64,
    /// Angle change since the previous sample, in radians.
    pub rotation_delta: f64,
}

impl Default for Pinch {
    fn default() -> Self {
        Self {
            scale: 1.0,
            scale_delta: 1.0,
            rotation: 0.0,
            rotation_delta: 0.0,
        }
    }
}

/// Outcome of feeding a sample to [`PinchState::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairUpdate {
    /// The contacts coincide; the sample was ignored.
    Degenerate,
    /// First sample: recorded as the formation baseline only.
    Seeded,
    /// A new transform is available from [`PinchState::current`].
    Updated,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    distance: f64,
    angle: f64,
}

/// Scale/rotation tracker for one pair of contacts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchState {
    formation: Option<Sample>,
    previous: Option<Sample>,
    current: Pinch,
}

impl PinchState {
    /// Feed the current positions of the primary (`a`) and secondary (`b`) contact.
    pub fn update(&mut self, a: Point, b: Point) -> PairUpdate {
        let distance = distance(a, b);
        if distance == 0.0 {
            return PairUpdate::Degenerate;
        }
        let sample = Sample {
            distance,
            angle: angle(a, b),
        };
        let Some(formation) = self.formation else {
            self.formation = Some(sample);
            self.previous = Some(sample);
            return PairUpdate::Seeded;
        };
        let previous = self.previous.unwrap_or(formation);
        self.current = Pinch {
            scale: sample.distance / formation.distance,
            scale_delta: sample.distance / previous.distance,
            rotation: sample.angle - formation.angle,
            rotation_delta: (sample.angle - previous.angle).to_radians(),
        };
        self.previous = Some(sample);
        PairUpdate::Updated
    }

    /// The most recently computed transform.
    pub fn current(&self) -> Pinch {
        self.current
    }

    /// Whether the formation baseline has been recorded.
    pub fn is_seeded(&self) -> bool {
        self.formation.is_some()
    }

    /// Forget the baseline and the last transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
