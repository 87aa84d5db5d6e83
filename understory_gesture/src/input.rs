// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input normalization: flatten a raw input event into single-contact records.
//!
//! Touch-style sources deliver a batch of concurrently changed contacts in one
//! event, while pointer and mouse sources deliver exactly one. The engine never
//! looks at the shape of the raw event beyond this module: every entry point
//! walks [`InputEvent::contacts`] and works on one [`ContactRecord`] at a time.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use smallvec::smallvec;
//! use understory_gesture::input::{Contact, InputEvent, Touch};
//!
//! let event = InputEvent::Touch(smallvec![
//!     Touch::new(7, Contact::new("canvas", Point::new(1.0, 2.0))),
//!     Touch::new(9, Contact::new("canvas", Point::new(5.0, 6.0))),
//! ]);
//!
//! let ids: Vec<_> = event.contacts().map(|r| r.identifier).collect();
//! assert_eq!(ids, vec![Some(7), Some(9)]);
//!
//! let click = InputEvent::Pointer(Contact::new("canvas", Point::new(3.0, 3.0)));
//! assert_eq!(click.contacts().map(|r| r.identifier).collect::<Vec<_>>(), vec![None]);
//! ```

use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Scroll amount carried by a wheel contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelDelta {
    /// Native wheel delta: positive scrolls away from the user (e.g. `+120` per notch).
    Native(f64),
    /// Detail-style delta: positive scrolls towards the user (e.g. `+3` lines).
    Detail(f64),
}

impl WheelDelta {
    /// Collapse the delta to a direction in `{-1, 0, 1}`, positive meaning "away".
    #[must_use]
    pub fn direction(self) -> i8 {
        let value = match self {
            Self::Native(v) => v,
            Self::Detail(v) => -v,
        };
        if value > 0.0 {
            1
        } else if value < 0.0 {
            -1
        } else {
            0
        }
    }
}

/// One contact point as seen by the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact<E> {
    /// Element the contact landed on.
    pub target: E,
    /// Event-space position (for example viewport coordinates).
    pub client: Point,
    /// Native element-local position, when the platform provides one.
    pub offset: Option<Point>,
    /// Bounding box of `target` in event space, used when `offset` is absent.
    pub bounds: Option<Rect>,
    /// Wheel delta for wheel events.
    pub wheel: Option<WheelDelta>,
}

impl<E> Contact<E> {
    /// Create a contact on `target` at event-space position `client`.
    pub fn new(target: E, client: Point) -> Self {
        Self {
            target,
            client,
            offset: None,
            bounds: None,
            wheel: None,
        }
    }

    /// Attach a native element-local position.
    #[must_use]
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attach the target's bounding box in event space.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Attach a wheel delta.
    #[must_use]
    pub fn with_wheel(mut self, wheel: WheelDelta) -> Self {
        self.wheel = Some(wheel);
        self
    }

    /// Element-local ("layer") position of this contact.
    ///
    /// Prefers the native offset; otherwise subtracts the origin of `bounds`
    /// from `client`. With neither available the event-space position is used.
    pub fn layer_position(&self) -> Point {
        if let Some(offset) = self.offset {
            return offset;
        }
        match self.bounds {
            Some(bounds) => (self.client - bounds.origin()).to_point(),
            None => self.client,
        }
    }
}

/// A contact inside a touch batch, tagged with its per-contact identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Touch<E> {
    /// Platform identifier, stable for the lifetime of the contact.
    pub identifier: u64,
    /// The contact itself.
    pub contact: Contact<E>,
}

impl<E> Touch<E> {
    /// Tag `contact` with `identifier`.
    pub fn new(identifier: u64, contact: Contact<E>) -> Self {
        Self {
            identifier,
            contact,
        }
    }
}

/// A raw input event as delivered by the platform.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent<E> {
    /// A singular pointer or mouse event.
    Pointer(Contact<E>),
    /// A touch frame carrying every contact that changed in it.
    Touch(SmallVec<[Touch<E>; 4]>),
}

impl<E> InputEvent<E> {
    /// Iterate the single-contact records carried by this event.
    pub fn contacts(&self) -> Contacts<'_, E> {
        match self {
            Self::Pointer(contact) => Contacts::Pointer(Some(contact)),
            Self::Touch(touches) => Contacts::Touch(touches.iter()),
        }
    }
}

/// A single-contact view of a raw event.
#[derive(Debug)]
pub struct ContactRecord<'a, E> {
    /// Batch identifier, or `None` for singular pointer/mouse sources.
    pub identifier: Option<u64>,
    /// The contact data.
    pub contact: &'a Contact<E>,
}

impl<E> Clone for ContactRecord<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ContactRecord<'_, E> {}

/// Iterator returned by [`InputEvent::contacts`].
#[derive(Debug)]
pub enum Contacts<'a, E> {
    /// Yields the single pointer contact once.
    Pointer(Option<&'a Contact<E>>),
    /// Yields each touch in batch order.
    Touch(core::slice::Iter<'a, Touch<E>>),
}

impl<'a, E> Iterator for Contacts<'a, E> {
    type Item = ContactRecord<'a, E>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Pointer(contact) => contact.take().map(|contact| ContactRecord {
                identifier: None,
                contact,
            }),
            Self::Touch(iter) => iter.next().map(|touch| ContactRecord {
                identifier: Some(touch.identifier),
                contact: &touch.contact,
            }),
        }
    }
}

/// Run `f` for every record of `event` and report whether any call returned `true`.
///
/// Every record is visited; a `true` result does not short-circuit the batch.
pub fn any_handled<'a, E>(
    event: &'a InputEvent<E>,
    mut f: impl FnMut(ContactRecord<'a, E>) -> bool,
) -> bool {
    event.contacts().fold(false, |handled, record| f(record) || handled)
}
