// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actions: one in-flight gesture record per contact, and the table that holds them.
//!
//! Two actions on the same element and selection form a *pair*. The pair is a
//! symmetric relation: both sides name each other through
//! [`Action::paired_with`], the older one is the primary, and removing either
//! side always unlinks the other. The table refuses to pair more than two
//! actions on one selection.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::binding::BindingId;
use crate::geometry::{Pinch, PinchState};
use crate::motion::Motion;

/// Identity of a contact for the lifetime of its action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactId {
    /// The single synthetic contact shared by pointer and mouse sources.
    Pointer,
    /// Identifier used by the hover entry point.
    Hover,
    /// A contact from a touch batch.
    Touch(u64),
}

/// The in-flight gesture state of one contact.
#[derive(Debug)]
pub struct Action<E, S, U> {
    identifier: ContactId,
    element: E,
    binding: BindingId,
    selection: Option<S>,
    pub(crate) active: bool,
    pub(crate) position: Point,
    pub(crate) motion: Motion,
    pub(crate) wheel: i8,
    pub(crate) paired_with: Option<ContactId>,
    pub(crate) secondary: bool,
    pub(crate) pinch: PinchState,
    pub(crate) user_data: Option<U>,
}

impl<E, S, U> Action<E, S, U> {
    pub(crate) fn new(
        identifier: ContactId,
        element: E,
        binding: BindingId,
        selection: Option<S>,
        position: Point,
        client: Point,
    ) -> Self {
        Self {
            identifier,
            element,
            binding,
            selection,
            active: true,
            position,
            motion: Motion::new(client),
            wheel: 0,
            paired_with: None,
            secondary: false,
            pinch: PinchState::default(),
            user_data: None,
        }
    }

    /// Contact identity.
    pub fn identifier(&self) -> ContactId {
        self.identifier
    }

    /// Element the action started on.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Registration the action belongs to.
    pub fn binding(&self) -> BindingId {
        self.binding
    }

    /// Sub-object chosen by `select` at creation, or `None` for the whole element.
    pub fn selection(&self) -> Option<&S> {
        self.selection.as_ref()
    }

    /// Whether move and wheel processing still applies to this action.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Element-local position from the most recent lookup.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Event-space position at creation.
    pub fn start(&self) -> Point {
        self.motion.start()
    }

    /// Event-space position at the most recent move.
    pub fn last(&self) -> Point {
        self.motion.last()
    }

    /// Delta of the most recent move.
    pub fn delta(&self) -> Vec2 {
        self.motion.delta()
    }

    /// Cumulative absolute travel per axis.
    pub fn total(&self) -> Vec2 {
        self.motion.total()
    }

    /// Net offset from start to the most recent move.
    pub fn diff(&self) -> Vec2 {
        self.motion.diff()
    }

    /// Wheel direction from the most recent wheel event, in `{-1, 0, 1}`.
    pub fn wheel(&self) -> i8 {
        self.wheel
    }

    /// The other action of this pair, if paired.
    pub fn paired_with(&self) -> Option<ContactId> {
        self.paired_with
    }

    /// Whether this action joined an existing one to form its pair.
    pub fn is_secondary(&self) -> bool {
        self.secondary
    }

    /// Scale and rotation of the pair; meaningful on the primary during `scale`/`rotate`.
    pub fn pinch(&self) -> Pinch {
        self.pinch.current()
    }

    /// Value returned by the binding's `start` handler.
    pub fn user_data(&self) -> Option<&U> {
        self.user_data.as_ref()
    }

    /// Mutable access to the user data.
    pub fn user_data_mut(&mut self) -> Option<&mut U> {
        self.user_data.as_mut()
    }
}

/// Live actions in creation order.
#[derive(Debug)]
pub struct ActionTable<E, S, U> {
    actions: Vec<Action<E, S, U>>,
}

impl<E, S, U> Default for ActionTable<E, S, U> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<E, S, U> ActionTable<E, S, U> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The action for `id`.
    pub fn get(&self, id: ContactId) -> Option<&Action<E, S, U>> {
        self.actions.iter().find(|a| a.identifier == id)
    }

    pub(crate) fn get_mut(&mut self, id: ContactId) -> Option<&mut Action<E, S, U>> {
        self.actions.iter_mut().find(|a| a.identifier == id)
    }

    /// Iterate live actions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Action<E, S, U>> {
        self.actions.iter()
    }

    /// Number of live actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no action is live.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Insert `action`, pairing it with `partner` when given.
    ///
    /// The caller guarantees that `action.identifier` is not live yet and that
    /// `partner` is live and unpaired.
    pub(crate) fn insert(&mut self, mut action: Action<E, S, U>, partner: Option<ContactId>) {
        if let Some(primary) = partner.and_then(|id| self.get_mut(id)) {
            primary.paired_with = Some(action.identifier);
            primary.secondary = false;
            primary.pinch.reset();
            action.paired_with = Some(primary.identifier);
            action.secondary = true;
        }
        self.actions.push(action);
    }

    /// Remove the action for `id`, unlinking its partner.
    pub(crate) fn remove(&mut self, id: ContactId) -> Option<Action<E, S, U>> {
        let index = self.actions.iter().position(|a| a.identifier == id)?;
        let action = self.actions.remove(index);
        if let Some(partner) = action.paired_with.and_then(|p| self.get_mut(p)) {
            partner.paired_with = None;
            partner.secondary = false;
            partner.pinch.reset();
        }
        Some(action)
    }

    /// Primary and secondary event-space positions of the pair containing `id`.
    pub(crate) fn pair_positions(&self, id: ContactId) -> Option<(ContactId, Point, Point)> {
        let action = self.get(id)?;
        let partner = self.get(action.paired_with?)?;
        let (primary, secondary) = if action.secondary {
            (partner, action)
        } else {
            (action, partner)
        };
        Some((primary.identifier, primary.last(), secondary.last()))
    }
}

/// How a new contact relates to the live actions on its element and selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pairing {
    /// Nothing else is live there.
    Solo,
    /// An unpaired action is live there; the new one becomes its secondary.
    With(ContactId),
    /// A pair is already live there; the new contact must be refused.
    Full,
}

impl<E: PartialEq, S: PartialEq, U> ActionTable<E, S, U> {
    /// Find the action a new contact on `element`/`selection` would pair with.
    pub(crate) fn pair_candidate(&self, element: &E, selection: Option<&S>) -> Pairing {
        match self
            .actions
            .iter()
            .find(|a| a.element == *element && a.selection.as_ref() == selection)
        {
            Some(a) if a.paired_with.is_some() => Pairing::Full,
            Some(a) => Pairing::With(a.identifier),
            None => Pairing::Solo,
        }
    }
}
