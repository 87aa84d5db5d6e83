// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action resolution: decide which action a single-contact record belongs to.
//!
//! For every record the resolver, in order:
//!
//! 1. Picks the contact identifier: an explicit override, else the batch
//!    identifier, else [`ContactId::Pointer`].
//! 2. Looks up the binding of the record's target and fires its `trigger`.
//! 3. Runs hover tracking on that binding, whether or not an action exists.
//! 4. Looks up the live action for the identifier. If it belongs to another
//!    registration and the caller allows stopping, the action is cancelled
//!    implicitly (`leave` runs if it had a selection) and nothing is returned.
//!    Otherwise the live action is refreshed and returned.
//! 5. Without a live action, creates one if the caller allows creation and the
//!    target is bound. A `select` miss reports `outer` instead. A contact on a
//!    selection that already carries a pair is refused.

use core::hash::Hash;

use crate::action::{Action, ContactId, Pairing};
use crate::binding::Hovered;
use crate::engine::GestureEngine;
use crate::input::{ContactRecord, InputEvent};

/// Create/stop permissions for one resolver call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveMode {
    /// A new action may be created when none is live for the contact.
    pub create: bool,
    /// A live action whose registration differs from the target's is cancelled.
    pub stop: bool,
}

impl ResolveMode {
    /// Press: may create, never stops.
    pub const START: Self = Self {
        create: true,
        stop: false,
    };
    /// Move and wheel: neither creates nor stops.
    pub const TRACK: Self = Self {
        create: false,
        stop: false,
    };
    /// Hover, cancel and release: may stop, never creates.
    pub const STOP: Self = Self {
        create: false,
        stop: true,
    };
}

/// Outcome of a successful resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub(crate) id: ContactId,
    pub(crate) created: bool,
}

impl<E: Copy + Eq + Hash, S: PartialEq, U> GestureEngine<E, S, U> {
    /// Resolve `record` (one contact of `event`) to the action it operates on.
    ///
    /// `identifier` overrides the contact identifier derived from the record.
    /// Returns `None` when there is no action to operate on for this record.
    pub fn resolve(
        &mut self,
        event: &InputEvent<E>,
        record: ContactRecord<'_, E>,
        mode: ResolveMode,
        identifier: Option<ContactId>,
    ) -> Option<&mut Action<E, S, U>> {
        let resolved = self.resolve_contact(event, record, mode, identifier)?;
        self.actions.get_mut(resolved.id)
    }

    pub(crate) fn resolve_contact(
        &mut self,
        event: &InputEvent<E>,
        record: ContactRecord<'_, E>,
        mode: ResolveMode,
        identifier: Option<ContactId>,
    ) -> Option<Resolved> {
        let identifier = identifier
            .or(record.identifier.map(ContactId::Touch))
            .unwrap_or(ContactId::Pointer);
        let contact = record.contact;
        let element = contact.target;
        let layer = contact.layer_position();

        let binding_id = self.bindings.get_mut(&element).map(|binding| {
            if let Some(trigger) = binding.handlers.on_trigger.as_mut() {
                trigger(contact);
            }
            binding.track_hover(layer, contact, event);
            binding.id()
        });

        if let Some(action) = self.actions.get_mut(identifier) {
            if mode.stop && binding_id != Some(action.binding()) {
                self.cancel_stale(identifier, event);
                return None;
            }
            action.position = layer;
            return Some(Resolved {
                id: identifier,
                created: false,
            });
        }

        if !mode.create {
            return None;
        }
        let binding = self.bindings.get_mut(&element)?;
        let selection = match binding.handlers.on_select.as_mut() {
            Some(select) => {
                let Some(selection) = select(layer, contact) else {
                    if let Some(outer) = binding.handlers.on_outer.as_mut() {
                        outer(layer, contact);
                    }
                    return None;
                };
                Some(selection)
            }
            None => None,
        };
        let binding_id = binding.id();

        let partner = match self.actions.pair_candidate(&element, selection.as_ref()) {
            Pairing::Solo => None,
            Pairing::With(partner) => Some(partner),
            Pairing::Full => {
                log::debug!("refusing {identifier:?}: selection already carries a pair");
                return None;
            }
        };
        let action = Action::new(
            identifier,
            element,
            binding_id,
            selection,
            layer,
            contact.client,
        );
        self.actions.insert(action, partner);
        match partner {
            Some(partner) => log::trace!("created {identifier:?}, paired with {partner:?}"),
            None => log::trace!("created {identifier:?}"),
        }
        Some(Resolved {
            id: identifier,
            created: true,
        })
    }

    /// Drop the action for `id` because its contact moved onto another registration.
    fn cancel_stale(&mut self, id: ContactId, event: &InputEvent<E>) {
        let Some(action) = self.actions.remove(id) else {
            return;
        };
        log::trace!("{id:?} left its element; cancelled implicitly");
        if action.selection().is_none() {
            return;
        }
        let element = *action.element();
        if let Some(leave) = self
            .bindings
            .live_mut(&element, action.binding())
            .and_then(|binding| binding.handlers.on_leave.as_mut())
        {
            leave(Hovered::Action(&action), event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Handlers;
    use crate::input::{Contact, Touch};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Point;
    use smallvec::smallvec;

    fn touch(id: u64, target: u32, x: f64, y: f64) -> InputEvent<u32> {
        InputEvent::Touch(smallvec![Touch::new(
            id,
            Contact::new(target, Point::new(x, y))
        )])
    }

    fn resolve_first(
        engine: &mut GestureEngine<u32, u8, ()>,
        event: &InputEvent<u32>,
        mode: ResolveMode,
    ) -> Option<ContactId> {
        let record = event.contacts().next().unwrap();
        engine
            .resolve(event, record, mode, None)
            .map(|a| a.identifier())
    }

    #[test]
    fn start_creates_and_track_reuses() {
        let mut engine = GestureEngine::<u32, u8, ()>::new();
        engine.bind(1, Handlers::new()).unwrap();

        let down = touch(5, 1, 0.0, 0.0);
        assert_eq!(
            resolve_first(&mut engine, &down, ResolveMode::START),
            Some(ContactId::Touch(5))
        );
        let moved = touch(5, 1, 2.0, 0.0);
        assert_eq!(
            resolve_first(&mut engine, &moved, ResolveMode::TRACK),
            Some(ContactId::Touch(5))
        );
        assert_eq!(engine.actions().len(), 1);
    }

    #[test]
    fn unbound_target_or_track_mode_never_creates() {
        let mut engine = GestureEngine::<u32, u8, ()>::new();
        engine.bind(1, Handlers::new()).unwrap();

        assert_eq!(
            resolve_first(&mut engine, &touch(1, 2, 0.0, 0.0), ResolveMode::START),
            None
        );
        assert_eq!(
            resolve_first(&mut engine, &touch(1, 1, 0.0, 0.0), ResolveMode::TRACK),
            None
        );
        assert!(engine.actions().is_empty());
    }

    #[test]
    fn pointer_contacts_share_one_identifier() {
        let mut engine = GestureEngine::<u32, u8, ()>::new();
        engine.bind(1, Handlers::new()).unwrap();

        let down = InputEvent::Pointer(Contact::new(1, Point::ZERO));
        assert_eq!(
            resolve_first(&mut engine, &down, ResolveMode::START),
            Some(ContactId::Pointer)
        );
        // A second press reuses the live pointer action.
        assert_eq!(
            resolve_first(&mut engine, &down, ResolveMode::START),
            Some(ContactId::Pointer)
        );
        assert_eq!(engine.actions().len(), 1);
    }

    #[test]
    fn select_miss_reports_outer() {
        let outer_hits = Rc::new(RefCell::new(Vec::new()));
        let hits = outer_hits.clone();
        let mut engine = GestureEngine::<u32, u8, ()>::new();
        engine
            .bind(
                1,
                Handlers::new()
                    .on_select(|p, _| (p.x < 10.0).then_some(1))
                    .on_outer(move |p, _| hits.borrow_mut().push(p)),
            )
            .unwrap();

        assert_eq!(
            resolve_first(&mut engine, &touch(1, 1, 20.0, 3.0), ResolveMode::START),
            None
        );
        assert_eq!(*outer_hits.borrow(), vec![Point::new(20.0, 3.0)]);
        assert!(engine.actions().is_empty());
    }

    #[test]
    fn stop_mode_cancels_action_that_changed_element() {
        let left = Rc::new(RefCell::new(0));
        let count = left.clone();
        let mut engine = GestureEngine::<u32, u8, ()>::new();
        engine
            .bind(
                1,
                Handlers::new()
                    .on_select(|_, _| Some(1))
                    .on_leave(move |subject, _| {
                        assert!(matches!(subject, Hovered::Action(_)));
                        *count.borrow_mut() += 1;
                    }),
            )
            .unwrap();
        engine.bind(2, Handlers::new()).unwrap();

        resolve_first(&mut engine, &touch(1, 1, 0.0, 0.0), ResolveMode::START);
        // Without stop permission the stale action is still returned.
        assert!(resolve_first(&mut engine, &touch(1, 2, 5.0, 0.0), ResolveMode::TRACK).is_some());
        assert_eq!(
            resolve_first(&mut engine, &touch(1, 2, 5.0, 0.0), ResolveMode::STOP),
            None
        );
        assert_eq!(*left.borrow(), 1);
        assert!(engine.actions().is_empty());
    }

    #[test]
    fn trigger_fires_for_every_contact_on_the_element() {
        let triggered = Rc::new(RefCell::new(0));
        let count = triggered.clone();
        let mut engine = GestureEngine::<u32, u8, ()>::new();
        engine
            .bind(
                1,
                Handlers::new().on_trigger(move |_| *count.borrow_mut() += 1),
            )
            .unwrap();

        resolve_first(&mut engine, &touch(1, 1, 0.0, 0.0), ResolveMode::TRACK);
        resolve_first(&mut engine, &touch(1, 1, 0.0, 0.0), ResolveMode::START);
        resolve_first(&mut engine, &touch(1, 1, 0.0, 0.0), ResolveMode::STOP);
        assert_eq!(*triggered.borrow(), 3);
    }

    #[test]
    fn lookup_refreshes_layer_position() {
        let mut engine = GestureEngine::<u32, u8, ()>::new();
        engine.bind(1, Handlers::new()).unwrap();
        resolve_first(&mut engine, &touch(1, 1, 0.0, 0.0), ResolveMode::START);
        resolve_first(&mut engine, &touch(1, 1, 4.0, 6.0), ResolveMode::TRACK);
        let action = engine.action(ContactId::Touch(1)).unwrap();
        assert_eq!(action.position(), Point::new(4.0, 6.0));
        // Lookup alone does not advance motion; that is the move entry point's job.
        assert_eq!(action.last(), Point::ZERO);
    }

    #[test]
    fn third_contact_on_a_pair_is_refused() {
        let mut engine = GestureEngine::<u32, u8, ()>::new();
        engine
            .bind(1, Handlers::new().on_select(|_, _| Some(9)))
            .unwrap();

        assert!(resolve_first(&mut engine, &touch(1, 1, 0.0, 0.0), ResolveMode::START).is_some());
        assert!(resolve_first(&mut engine, &touch(2, 1, 5.0, 0.0), ResolveMode::START).is_some());
        assert_eq!(
            resolve_first(&mut engine, &touch(3, 1, 9.0, 0.0), ResolveMode::START),
            None
        );
        assert_eq!(engine.actions().len(), 2);
        assert_eq!(
            engine.action(ContactId::Touch(1)).unwrap().paired_with(),
            Some(ContactId::Touch(2))
        );
    }
}
