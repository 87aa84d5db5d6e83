// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing from platform event names to engine entry points.
//!
//! Platforms that name their events the way web browsers do can subscribe the
//! engine with [`EventKind::for_event_name`] and forward each raw event through
//! [`GestureEngine::handle`]. Some names feed more than one entry point:
//! `mousemove` drives both move and hover.
//!
//! ```
//! use understory_gesture::route::EventKind;
//!
//! assert_eq!(EventKind::for_event_name("touchstart"), &[EventKind::Start]);
//! assert_eq!(
//!     EventKind::for_event_name("mousemove"),
//!     &[EventKind::Move, EventKind::Over]
//! );
//! assert!(EventKind::for_event_name("keydown").is_empty());
//! ```

use core::hash::Hash;

use crate::engine::GestureEngine;
use crate::input::InputEvent;

/// Which lifecycle entry point a raw event drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Press (`mousedown`, `touchstart`, `pointerdown`).
    Start,
    /// Movement while tracking (`touchmove`, `mousemove`, `pointermove`).
    Move,
    /// Release (`touchend`, `mouseup`, `pointerup`).
    End,
    /// Platform cancellation (`touchcancel`, `pointercancel`).
    Cancel,
    /// Wheel (`mousewheel`, `wheel`).
    Wheel,
    /// Pointer movement without button state (`mouseover`, `mousemove`).
    Over,
}

impl EventKind {
    /// Entry points driven by the platform event called `name`, in dispatch order.
    pub fn for_event_name(name: &str) -> &'static [Self] {
        match name {
            "mousedown" | "touchstart" | "pointerdown" => &[Self::Start],
            "touchmove" | "pointermove" => &[Self::Move],
            "mousemove" => &[Self::Move, Self::Over],
            "mouseover" => &[Self::Over],
            "touchend" | "mouseup" | "pointerup" => &[Self::End],
            "touchcancel" | "pointercancel" => &[Self::Cancel],
            "mousewheel" | "wheel" => &[Self::Wheel],
            _ => &[],
        }
    }
}

impl<E: Copy + Eq + Hash, S: PartialEq, U: Clone> GestureEngine<E, S, U> {
    /// Forward `event` to the entry point for `kind`.
    ///
    /// Returns `true` when default platform handling should be suppressed.
    pub fn handle(&mut self, kind: EventKind, event: &InputEvent<E>) -> bool {
        match kind {
            EventKind::Start => self.handle_start(event),
            EventKind::Move => self.handle_move(event),
            EventKind::End => self.handle_end(event),
            EventKind::Cancel => self.handle_cancel(event),
            EventKind::Wheel => self.handle_wheel(event),
            EventKind::Over => self.handle_hover(event),
        }
    }

    /// Forward `event` to every entry point the platform event `name` drives.
    ///
    /// Unknown names are ignored.
    pub fn handle_named(&mut self, name: &str, event: &InputEvent<E>) -> bool {
        EventKind::for_event_name(name)
            .iter()
            .fold(false, |handled, &kind| self.handle(kind, event) || handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Handlers;
    use crate::input::Contact;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Point;

    #[test]
    fn every_subscribed_name_routes_somewhere() {
        for name in [
            "mousedown",
            "touchstart",
            "pointerdown",
            "touchmove",
            "mousemove",
            "pointermove",
            "touchend",
            "mouseup",
            "pointerup",
            "touchcancel",
            "pointercancel",
            "mousewheel",
            "mouseover",
        ] {
            assert!(!EventKind::for_event_name(name).is_empty(), "{name}");
        }
    }

    #[test]
    fn named_mouse_sequence_drives_a_click() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (c, e) = (log.clone(), log.clone());
        let mut engine = GestureEngine::<u32>::new();
        engine
            .bind(
                1,
                Handlers::new()
                    .on_click(move |_, _| c.borrow_mut().push("click"))
                    .on_end(move |_, _| e.borrow_mut().push("end")),
            )
            .unwrap();

        let at = |x: f64| InputEvent::Pointer(Contact::new(1, Point::new(x, 0.0)));
        assert!(engine.handle_named("mousedown", &at(0.0)));
        assert!(engine.handle_named("mousemove", &at(2.0)));
        assert!(!engine.handle_named("mouseup", &at(2.0)));
        assert!(!engine.handle_named("keydown", &at(2.0)));

        assert_eq!(*log.borrow(), vec!["click", "end"]);
        assert!(engine.actions().is_empty());
    }
}
