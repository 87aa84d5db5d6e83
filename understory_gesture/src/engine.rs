// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: owner of the binding registry and the action table.

use core::hash::Hash;

use crate::action::{Action, ActionTable, ContactId};
use crate::binding::{BindError, Binding, BindingId, BindingRegistry, Handlers};
use crate::config::GestureConfig;

/// Multi-contact gesture engine.
///
/// - `E`: element handle (for example a node id).
/// - `S`: selection token returned by `select` handlers.
/// - `U`: user data returned by `start` handlers.
///
/// Each engine owns its bindings and actions; independent engines never share state.
#[derive(Debug)]
pub struct GestureEngine<E, S = (), U = ()> {
    pub(crate) config: GestureConfig,
    pub(crate) bindings: BindingRegistry<E, S, U>,
    pub(crate) actions: ActionTable<E, S, U>,
}

impl<E, S, U> Default for GestureEngine<E, S, U> {
    fn default() -> Self {
        Self {
            config: GestureConfig::default(),
            bindings: BindingRegistry::default(),
            actions: ActionTable::default(),
        }
    }
}

impl<E: Copy + Eq + Hash, S, U> GestureEngine<E, S, U> {
    /// An engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with `config`.
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Register `element` with `handlers`.
    ///
    /// The returned id can be passed to [`release`](Self::release) to undo exactly
    /// this registration.
    pub fn bind(&mut self, element: E, handlers: Handlers<E, S, U>) -> Result<BindingId, BindError> {
        let id = self.bindings.bind(element, handlers)?;
        log::trace!("bound element as {id:?}");
        Ok(id)
    }

    /// Remove the binding of `element`.
    ///
    /// Actions already started on it stay live until their contact ends or is
    /// cancelled; their handlers are no longer invoked.
    pub fn unbind(&mut self, element: &E) -> bool {
        self.bindings.unbind(element)
    }

    /// Remove registration `id` if it is still in place.
    pub fn release(&mut self, id: BindingId) -> bool {
        self.bindings.release(id)
    }

    /// The binding of `element`, if any.
    pub fn binding(&self, element: &E) -> Option<&Binding<E, S, U>> {
        self.bindings.get(element)
    }

    /// The binding registry.
    pub fn bindings(&self) -> &BindingRegistry<E, S, U> {
        &self.bindings
    }

    /// The live actions.
    pub fn actions(&self) -> &ActionTable<E, S, U> {
        &self.actions
    }

    /// The live action for `id`.
    pub fn action(&self, id: ContactId) -> Option<&Action<E, S, U>> {
        self.actions.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Contact, InputEvent};
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::Point;

    fn at(x: f64) -> InputEvent<u32> {
        InputEvent::Pointer(Contact::new(1, Point::new(x, 0.0)))
    }

    #[test]
    fn click_slop_is_configurable() {
        let clicks = Rc::new(Cell::new(0));
        let count = clicks.clone();
        let mut engine =
            GestureEngine::<u32>::with_config(GestureConfig::default().with_click_slop(2.0));
        engine
            .bind(
                1,
                Handlers::new().on_click(move |_, _| count.set(count.get() + 1)),
            )
            .unwrap();

        engine.handle_start(&at(0.0));
        engine.handle_move(&at(3.0));
        engine.handle_end(&at(3.0));
        assert_eq!(clicks.get(), 0);

        engine.handle_start(&at(0.0));
        engine.handle_move(&at(1.0));
        engine.handle_end(&at(1.0));
        assert_eq!(clicks.get(), 1);
        assert_eq!(engine.config().click_slop, 2.0);
    }

    #[test]
    fn rebinding_after_unbind_yields_a_fresh_id() {
        let mut engine = GestureEngine::<u32>::new();
        let first = engine.bind(1, Handlers::new()).unwrap();
        assert_eq!(
            engine.bind(1, Handlers::new()),
            Err(BindError::AlreadyBound)
        );
        assert!(engine.unbind(&1));
        let second = engine.bind(1, Handlers::new()).unwrap();
        assert_ne!(first, second);
        assert!(!engine.release(first));
        assert_eq!(engine.binding(&1).map(Binding::id), Some(second));
    }
}
