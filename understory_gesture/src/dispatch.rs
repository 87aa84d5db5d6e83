// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle entry points: start, move, wheel, hover, cancel and end.
//!
//! Each entry point walks the records of one raw event, resolves each record
//! to an action and invokes the binding's handlers in a fixed order. The
//! returned `bool` tells the caller whether default platform handling should
//! be suppressed for the whole raw event; it is `true` as soon as one record
//! asks for it.
//!
//! | Entry point      | Creates | Stops | Suppresses default when                          |
//! |------------------|---------|-------|--------------------------------------------------|
//! | `handle_start`   | yes     | no    | a record resolved to an action                   |
//! | `handle_move`    | no      | no    | paired, or the move handler keeps tracking       |
//! | `handle_wheel`   | no      | no    | `wheel` returned `false`                         |
//! | `handle_hover`   | no      | yes   | `hover` returned `false`                         |
//! | `handle_cancel`  | no      | yes   | never                                            |
//! | `handle_end`     | no      | yes   | never                                            |

use core::hash::Hash;

use crate::action::{Action, ContactId};
use crate::binding::{Binding, Hovered};
use crate::engine::GestureEngine;
use crate::geometry::PairUpdate;
use crate::input::{InputEvent, WheelDelta, any_handled};
use crate::resolve::{ResolveMode, Resolved};

impl<E: Copy + Eq + Hash, S: PartialEq, U: Clone> GestureEngine<E, S, U> {
    /// Press: create (or find) an action per contact and call `start`.
    ///
    /// The value returned by `start` becomes the action's user data. A freshly
    /// created secondary of a pair takes over the primary's user data instead.
    pub fn handle_start(&mut self, event: &InputEvent<E>) -> bool {
        any_handled(event, |record| {
            let Some(resolved) = self.resolve_contact(event, record, ResolveMode::START, None)
            else {
                return false;
            };
            self.run_start(resolved, event);
            true
        })
    }

    fn run_start(&mut self, resolved: Resolved, event: &InputEvent<E>) {
        let Some((action, binding)) = self.action_and_binding(resolved.id) else {
            return;
        };
        if let Some(start) = binding.handlers.on_start.as_mut() {
            action.user_data = Some(start(action, event));
        }
        if !(resolved.created && action.secondary) {
            return;
        }
        let Some(primary) = action.paired_with else {
            return;
        };
        let inherited = self
            .actions
            .get(primary)
            .and_then(|p| p.user_data.clone());
        if let Some(action) = self.actions.get_mut(resolved.id) {
            action.user_data = inherited;
        }
    }
}

impl<E: Copy + Eq + Hash, S: PartialEq, U> GestureEngine<E, S, U> {
    /// Move: update displacement and route to pinch, `move2`, `try_move` or `move`.
    ///
    /// - A paired action feeds the pair geometry and calls `scale`/`rotate`
    ///   once a baseline exists; it always suppresses default handling.
    /// - Otherwise `move2`, when present, sees every move.
    /// - Otherwise vertical-dominant travel goes to `try_move` and the rest to `move`.
    ///
    /// A `true` return from `move2`/`try_move` deactivates the action and lets
    /// the platform handle the event; `false` keeps tracking and suppresses it.
    /// `move` always suppresses; a `true` return additionally deactivates.
    pub fn handle_move(&mut self, event: &InputEvent<E>) -> bool {
        any_handled(event, |record| {
            let Some(resolved) = self.resolve_contact(event, record, ResolveMode::TRACK, None)
            else {
                return false;
            };
            let id = resolved.id;
            let paired = match self.actions.get_mut(id) {
                Some(action) if action.active => {
                    action.motion.update(record.contact.client);
                    action.paired_with.is_some()
                }
                _ => return false,
            };
            if paired {
                return self.pair_move(id, event);
            }
            let Some((action, binding)) = self.action_and_binding(id) else {
                return false;
            };
            let handlers = &mut binding.handlers;
            if let Some(move2) = handlers.on_move2.as_mut() {
                let released = move2(action, event);
                release_if(action, released)
            } else if action.motion.is_vertical() {
                let Some(try_move) = handlers.on_try_move.as_mut() else {
                    return false;
                };
                let released = try_move(action, event);
                release_if(action, released)
            } else {
                if let Some(on_move) = handlers.on_move.as_mut() {
                    if on_move(action, event) {
                        action.active = false;
                    }
                }
                true
            }
        })
    }

    /// Feed the pair containing `id` and report scale/rotation on the primary.
    fn pair_move(&mut self, id: ContactId, event: &InputEvent<E>) -> bool {
        let Some((primary, a, b)) = self.actions.pair_positions(id) else {
            return false;
        };
        let Some((action, binding)) = self.action_and_binding(primary) else {
            return false;
        };
        if action.pinch.update(a, b) != PairUpdate::Updated {
            return true;
        }
        if let Some(scale) = binding.handlers.on_scale.as_mut() {
            scale(action, event);
        }
        if let Some(rotate) = binding.handlers.on_rotate.as_mut() {
            rotate(action, event);
        }
        true
    }

    /// Wheel: record the clamped direction and call `wheel`.
    pub fn handle_wheel(&mut self, event: &InputEvent<E>) -> bool {
        any_handled(event, |record| {
            let Some(resolved) = self.resolve_contact(event, record, ResolveMode::TRACK, None)
            else {
                return false;
            };
            let Some((action, binding)) = self.action_and_binding(resolved.id) else {
                return false;
            };
            if !action.active {
                return false;
            }
            action.wheel = record.contact.wheel.map_or(0, WheelDelta::direction);
            match binding.handlers.on_wheel.as_mut() {
                Some(wheel) => !wheel(action, event),
                None => false,
            }
        })
    }

    /// Hover: pointer movement without a pressed button.
    ///
    /// Resolves under [`ContactId::Hover`], which also drives hover tracking and
    /// stale-action cleanup. A hover action on a binding without `hover` is dropped.
    pub fn handle_hover(&mut self, event: &InputEvent<E>) -> bool {
        any_handled(event, |record| {
            let Some(resolved) =
                self.resolve_contact(event, record, ResolveMode::STOP, Some(ContactId::Hover))
            else {
                return false;
            };
            let outcome = self.action_and_binding(resolved.id).and_then(|(action, binding)| {
                let hover = binding.handlers.on_hover.as_mut()?;
                Some(!hover(Hovered::Action(action), event))
            });
            outcome.unwrap_or_else(|| {
                self.actions.remove(resolved.id);
                false
            })
        })
    }

    /// Cancel: deactivate, call `cancel` then `finally`, and drop the action.
    pub fn handle_cancel(&mut self, event: &InputEvent<E>) -> bool {
        any_handled(event, |record| {
            let Some(resolved) = self.resolve_contact(event, record, ResolveMode::STOP, None)
            else {
                return false;
            };
            let Some(mut action) = self.actions.remove(resolved.id) else {
                return false;
            };
            log::trace!("{:?} cancelled", resolved.id);
            action.active = false;
            if let Some(binding) = self.bindings.live_mut(action.element(), action.binding()) {
                let handlers = &mut binding.handlers;
                if let Some(cancel) = handlers.on_cancel.as_mut() {
                    cancel(&mut action, event);
                }
                if let Some(finally) = handlers.on_finally.as_mut() {
                    finally(&mut action, event);
                }
            }
            false
        })
    }

    /// End: for an active action, call `click` (if it barely moved), `end` and
    /// `finally`. The action is dropped either way.
    pub fn handle_end(&mut self, event: &InputEvent<E>) -> bool {
        let slop = self.config.click_slop;
        any_handled(event, |record| {
            let Some(resolved) = self.resolve_contact(event, record, ResolveMode::STOP, None)
            else {
                return false;
            };
            let Some(mut action) = self.actions.remove(resolved.id) else {
                return false;
            };
            log::trace!("{:?} ended", resolved.id);
            if !action.active {
                return false;
            }
            let Some(binding) = self.bindings.live_mut(action.element(), action.binding()) else {
                log::debug!("{:?} ended after its binding was removed", resolved.id);
                return false;
            };
            let handlers = &mut binding.handlers;
            if action.motion.within(slop) {
                if let Some(click) = handlers.on_click.as_mut() {
                    click(&mut action, event);
                }
            }
            if let Some(end) = handlers.on_end.as_mut() {
                end(&mut action, event);
            }
            if let Some(finally) = handlers.on_finally.as_mut() {
                finally(&mut action, event);
            }
            false
        })
    }

    /// The live action for `id` together with its still-registered binding.
    fn action_and_binding(
        &mut self,
        id: ContactId,
    ) -> Option<(&mut Action<E, S, U>, &mut Binding<E, S, U>)> {
        let action = self.actions.get_mut(id)?;
        let element = *action.element();
        let Some(binding) = self.bindings.live_mut(&element, action.binding()) else {
            log::debug!("{id:?} refers to a binding that is gone");
            return None;
        };
        Some((action, binding))
    }
}

/// Deactivate `action` when a handler released the gesture; report whether to suppress.
fn release_if<E, S, U>(action: &mut Action<E, S, U>, released: bool) -> bool {
    if released {
        action.active = false;
    }
    !released
}
