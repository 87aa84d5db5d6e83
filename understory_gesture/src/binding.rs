// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bindings: elements registered together with their capability set of handlers.
//!
//! A [`Handlers`] value is sparse. Each capability is an optional slot, and the
//! engine only ever invokes the slots that are filled. [`Handlers::capabilities`]
//! summarizes which slots are present as a [`Capabilities`] bitset.
//!
//! ```
//! use understory_gesture::binding::{Capabilities, Handlers};
//!
//! let handlers: Handlers<u32, (), ()> = Handlers::new()
//!     .on_move(|_action, _event| false)
//!     .on_click(|_action, _event| {});
//!
//! assert_eq!(handlers.capabilities(), Capabilities::MOVE | Capabilities::CLICK);
//! ```

use alloc::boxed::Box;
use core::fmt;
use core::hash::Hash;

use bitflags::bitflags;
use hashbrown::HashMap;
use kurbo::Point;

use crate::action::Action;
use crate::input::{Contact, InputEvent};

bitflags! {
    /// Which handler slots of a [`Handlers`] value are filled.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Side-channel notification for every contact on the element.
        const TRIGGER = 1 << 0;
        /// Maps a layer position to a selection token.
        const SELECT = 1 << 1;
        /// Hover enter, or hover entry-point notification.
        const HOVER = 1 << 2;
        /// Hover leave, or implicit cancellation cleanup.
        const LEAVE = 1 << 3;
        /// A press missed every selectable sub-object.
        const OUTER = 1 << 4;
        /// A new action started.
        const START = 1 << 5;
        /// Horizontal (or undecided) movement.
        const MOVE = 1 << 6;
        /// Vertical movement.
        const TRY_MOVE = 1 << 7;
        /// Raw movement pass-through, bypassing axis classification.
        const MOVE2 = 1 << 8;
        /// Two-contact scale.
        const SCALE = 1 << 9;
        /// Two-contact rotation.
        const ROTATE = 1 << 10;
        /// Wheel input.
        const WHEEL = 1 << 11;
        /// Release without meaningful travel.
        const CLICK = 1 << 12;
        /// Release.
        const END = 1 << 13;
        /// Platform cancellation.
        const CANCEL = 1 << 14;
        /// Runs after `end` or `cancel`.
        const FINALLY = 1 << 15;

        /// Everything hover tracking needs.
        const HOVER_TRACKING = Self::SELECT.bits() | Self::HOVER.bits() | Self::LEAVE.bits();
    }
}

/// Subject of a `hover` or `leave` call.
#[derive(Debug)]
pub enum Hovered<'a, E, S, U> {
    /// Hover tracking moved onto (or away from) this selection.
    Selection(&'a S),
    /// An action is hovering, or was cancelled because its contact left the element.
    Action(&'a Action<E, S, U>),
}

type TriggerFn<E> = Box<dyn FnMut(&Contact<E>)>;
type SelectFn<E, S> = Box<dyn FnMut(Point, &Contact<E>) -> Option<S>>;
type OuterFn<E> = Box<dyn FnMut(Point, &Contact<E>)>;
type HoverFn<E, S, U> = Box<dyn FnMut(Hovered<'_, E, S, U>, &InputEvent<E>) -> bool>;
type LeaveFn<E, S, U> = Box<dyn FnMut(Hovered<'_, E, S, U>, &InputEvent<E>)>;
type StartFn<E, S, U> = Box<dyn FnMut(&mut Action<E, S, U>, &InputEvent<E>) -> U>;
type ClaimFn<E, S, U> = Box<dyn FnMut(&mut Action<E, S, U>, &InputEvent<E>) -> bool>;
type NotifyFn<E, S, U> = Box<dyn FnMut(&mut Action<E, S, U>, &InputEvent<E>)>;

/// The capability set of one binding.
///
/// Handlers that return `bool` use `true` to mean "this gesture is finished or
/// claimed by me"; see the crate docs for how each return value affects
/// default-handling suppression.
pub struct Handlers<E, S, U> {
    pub(crate) on_trigger: Option<TriggerFn<E>>,
    pub(crate) on_select: Option<SelectFn<E, S>>,
    pub(crate) on_hover: Option<HoverFn<E, S, U>>,
    pub(crate) on_leave: Option<LeaveFn<E, S, U>>,
    pub(crate) on_outer: Option<OuterFn<E>>,
    pub(crate) on_start: Option<StartFn<E, S, U>>,
    pub(crate) on_move: Option<ClaimFn<E, S, U>>,
    pub(crate) on_try_move: Option<ClaimFn<E, S, U>>,
    pub(crate) on_move2: Option<ClaimFn<E, S, U>>,
    pub(crate) on_scale: Option<NotifyFn<E, S, U>>,
    pub(crate) on_rotate: Option<NotifyFn<E, S, U>>,
    pub(crate) on_wheel: Option<ClaimFn<E, S, U>>,
    pub(crate) on_click: Option<NotifyFn<E, S, U>>,
    pub(crate) on_end: Option<NotifyFn<E, S, U>>,
    pub(crate) on_cancel: Option<NotifyFn<E, S, U>>,
    pub(crate) on_finally: Option<NotifyFn<E, S, U>>,
}

impl<E, S, U> Default for Handlers<E, S, U> {
    fn default() -> Self {
        Self {
            on_trigger: None,
            on_select: None,
            on_hover: None,
            on_leave: None,
            on_outer: None,
            on_start: None,
            on_move: None,
            on_try_move: None,
            on_move2: None,
            on_scale: None,
            on_rotate: None,
            on_wheel: None,
            on_click: None,
            on_end: None,
            on_cancel: None,
            on_finally: None,
        }
    }
}

impl<E, S, U> fmt::Debug for Handlers<E, S, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}

impl<E, S, U> Handlers<E, S, U> {
    /// An empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Which slots are filled.
    pub fn capabilities(&self) -> Capabilities {
        let slots = [
            (self.on_trigger.is_some(), Capabilities::TRIGGER),
            (self.on_select.is_some(), Capabilities::SELECT),
            (self.on_hover.is_some(), Capabilities::HOVER),
            (self.on_leave.is_some(), Capabilities::LEAVE),
            (self.on_outer.is_some(), Capabilities::OUTER),
            (self.on_start.is_some(), Capabilities::START),
            (self.on_move.is_some(), Capabilities::MOVE),
            (self.on_try_move.is_some(), Capabilities::TRY_MOVE),
            (self.on_move2.is_some(), Capabilities::MOVE2),
            (self.on_scale.is_some(), Capabilities::SCALE),
            (self.on_rotate.is_some(), Capabilities::ROTATE),
            (self.on_wheel.is_some(), Capabilities::WHEEL),
            (self.on_click.is_some(), Capabilities::CLICK),
            (self.on_end.is_some(), Capabilities::END),
            (self.on_cancel.is_some(), Capabilities::CANCEL),
            (self.on_finally.is_some(), Capabilities::FINALLY),
        ];
        slots
            .into_iter()
            .filter(|(present, _)| *present)
            .fold(Capabilities::empty(), |acc, (_, cap)| acc | cap)
    }

    /// Called with every contact that lands on the element, before any action logic.
    #[must_use]
    pub fn on_trigger(mut self, f: impl FnMut(&Contact<E>) + 'static) -> Self {
        self.on_trigger = Some(Box::new(f));
        self
    }

    /// Map a layer position to a selection token; `None` means "nothing selectable here".
    #[must_use]
    pub fn on_select(mut self, f: impl FnMut(Point, &Contact<E>) -> Option<S> + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    /// Hover enter for a selection, or hover notification for an action.
    ///
    /// Returning `false` from an action hover suppresses default handling.
    #[must_use]
    pub fn on_hover(
        mut self,
        f: impl FnMut(Hovered<'_, E, S, U>, &InputEvent<E>) -> bool + 'static,
    ) -> Self {
        self.on_hover = Some(Box::new(f));
        self
    }

    /// Hover leave for a selection, or cleanup for an implicitly cancelled action.
    #[must_use]
    pub fn on_leave(mut self, f: impl FnMut(Hovered<'_, E, S, U>, &InputEvent<E>) + 'static) -> Self {
        self.on_leave = Some(Box::new(f));
        self
    }

    /// A press landed outside every selectable sub-object.
    #[must_use]
    pub fn on_outer(mut self, f: impl FnMut(Point, &Contact<E>) + 'static) -> Self {
        self.on_outer = Some(Box::new(f));
        self
    }

    /// A new action started; the return value becomes the action's user data.
    #[must_use]
    pub fn on_start(
        mut self,
        f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) -> U + 'static,
    ) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Horizontal movement. Returning `true` finishes the action.
    #[must_use]
    pub fn on_move(
        mut self,
        f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) -> bool + 'static,
    ) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }

    /// Vertical movement. Returning `true` hands the gesture back to the platform.
    #[must_use]
    pub fn on_try_move(
        mut self,
        f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) -> bool + 'static,
    ) -> Self {
        self.on_try_move = Some(Box::new(f));
        self
    }

    /// Raw movement. Returning `true` hands the gesture back to the platform.
    #[must_use]
    pub fn on_move2(
        mut self,
        f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) -> bool + 'static,
    ) -> Self {
        self.on_move2 = Some(Box::new(f));
        self
    }

    /// Two-contact scale; read [`Action::pinch`] for the values.
    #[must_use]
    pub fn on_scale(mut self, f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) + 'static) -> Self {
        self.on_scale = Some(Box::new(f));
        self
    }

    /// Two-contact rotation; read [`Action::pinch`] for the values.
    #[must_use]
    pub fn on_rotate(
        mut self,
        f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) + 'static,
    ) -> Self {
        self.on_rotate = Some(Box::new(f));
        self
    }

    /// Wheel input; read [`Action::wheel`]. Returning `false` suppresses default handling.
    #[must_use]
    pub fn on_wheel(
        mut self,
        f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) -> bool + 'static,
    ) -> Self {
        self.on_wheel = Some(Box::new(f));
        self
    }

    /// Release of an action that barely moved.
    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Release of an active action.
    #[must_use]
    pub fn on_end(mut self, f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    /// Platform cancellation.
    #[must_use]
    pub fn on_cancel(
        mut self,
        f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) + 'static,
    ) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    /// Runs after `end` or `cancel`.
    #[must_use]
    pub fn on_finally(
        mut self,
        f: impl FnMut(&mut Action<E, S, U>, &InputEvent<E>) + 'static,
    ) -> Self {
        self.on_finally = Some(Box::new(f));
        self
    }
}

/// Identity of one registration.
///
/// Re-binding an element yields a fresh id, so actions started under the old
/// registration never match the new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub(crate) u64);

/// Registration failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The element already has a binding; unbind it first.
    #[error("element is already bound")]
    AlreadyBound,
}

/// An element registered with its handlers.
#[derive(Debug)]
pub struct Binding<E, S, U> {
    id: BindingId,
    element: E,
    pub(crate) handlers: Handlers<E, S, U>,
    last_hover: Option<S>,
}

impl<E, S, U> Binding<E, S, U> {
    /// Registration identity.
    pub fn id(&self) -> BindingId {
        self.id
    }

    /// The bound element.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// The capability set.
    pub fn handlers(&self) -> &Handlers<E, S, U> {
        &self.handlers
    }

    /// The selection hover tracking currently considers hovered.
    pub fn last_hover(&self) -> Option<&S> {
        self.last_hover.as_ref()
    }
}

impl<E, S: PartialEq, U> Binding<E, S, U> {
    /// Emit leave/hover transitions for the selection under `layer`.
    ///
    /// Does nothing unless `select`, `hover` and `leave` are all present.
    pub(crate) fn track_hover(&mut self, layer: Point, contact: &Contact<E>, event: &InputEvent<E>) {
        let Self {
            handlers,
            last_hover,
            ..
        } = self;
        let (Some(select), Some(hover), Some(leave)) = (
            handlers.on_select.as_mut(),
            handlers.on_hover.as_mut(),
            handlers.on_leave.as_mut(),
        ) else {
            return;
        };
        let selection = select(layer, contact);
        if selection == *last_hover {
            return;
        }
        if let Some(previous) = last_hover.take() {
            leave(Hovered::Selection(&previous), event);
        }
        *last_hover = selection;
        if let Some(current) = last_hover.as_ref() {
            hover(Hovered::Selection(current), event);
        }
    }
}

/// All bindings of one engine, at most one per element.
#[derive(Debug)]
pub struct BindingRegistry<E, S, U> {
    bindings: HashMap<E, Binding<E, S, U>>,
    next_id: u64,
}

impl<E, S, U> Default for BindingRegistry<E, S, U> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<E: Copy + Eq + Hash, S, U> BindingRegistry<E, S, U> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element` with `handlers`.
    pub fn bind(&mut self, element: E, handlers: Handlers<E, S, U>) -> Result<BindingId, BindError> {
        if self.bindings.contains_key(&element) {
            return Err(BindError::AlreadyBound);
        }
        let id = BindingId(self.next_id);
        self.next_id += 1;
        self.bindings.insert(
            element,
            Binding {
                id,
                element,
                handlers,
                last_hover: None,
            },
        );
        Ok(id)
    }

    /// Remove the binding for `element`, returning whether one existed.
    pub fn unbind(&mut self, element: &E) -> bool {
        self.bindings.remove(element).is_some()
    }

    /// Remove exactly the registration `id`, returning whether it was still present.
    pub fn release(&mut self, id: BindingId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|_, binding| binding.id != id);
        self.bindings.len() != before
    }

    /// The binding for `element`, if any.
    pub fn get(&self, element: &E) -> Option<&Binding<E, S, U>> {
        self.bindings.get(element)
    }

    pub(crate) fn get_mut(&mut self, element: &E) -> Option<&mut Binding<E, S, U>> {
        self.bindings.get_mut(element)
    }

    /// The binding for `element`, but only if it is still registration `id`.
    pub(crate) fn live_mut(&mut self, element: &E, id: BindingId) -> Option<&mut Binding<E, S, U>> {
        self.bindings.get_mut(element).filter(|b| b.id == id)
    }

    /// Number of bound elements.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
