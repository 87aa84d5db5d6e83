// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: multi-contact gesture resolution for UI elements.
//!
//! This crate turns raw pointer, mouse and touch callbacks into a coherent
//! per-contact gesture model. Applications register elements together with a
//! sparse set of handlers, then forward raw input to the engine. For every
//! contact the engine decides which element and which in-flight *action* it
//! belongs to, and calls the matching handlers with normalized geometry:
//!
//! - **press / release / cancel** with click detection for contacts that barely moved
//! - **move**, classified as horizontal (`move`), vertical (`try_move`) or raw (`move2`)
//! - **hover** enter/leave on sub-objects chosen by a `select` handler
//! - **scale / rotate** for two contacts on the same selection
//! - **wheel** with a direction clamped to `{-1, 0, 1}`
//!
//! The engine does not subscribe to platform events, hit test, or paint. Feed
//! it [`InputEvent`](input::InputEvent) values whose contacts already carry a
//! target element and coordinates, and use the returned `bool` to decide
//! whether to suppress the platform's default handling.
//!
//! ## Modules
//!
//! - [`input`]: raw events and their single-contact records
//! - [`binding`]: handler capability sets and the binding registry
//! - [`action`]: per-contact action records and pairing
//! - [`resolve`]: mapping a record to its action
//! - [`dispatch`]: the six lifecycle entry points
//! - [`geometry`]: two-contact distance, angle, scale and rotation
//! - [`motion`]: per-contact displacement tracking
//! - [`route`]: mapping platform event names to entry points
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use understory_gesture::GestureEngine;
//! use understory_gesture::binding::Handlers;
//! use understory_gesture::input::{Contact, InputEvent};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (moves, clicks) = (log.clone(), log.clone());
//!
//! let mut engine = GestureEngine::<u32>::new();
//! engine
//!     .bind(
//!         7,
//!         Handlers::new()
//!             .on_move(move |action, _| {
//!                 moves.borrow_mut().push(format!("move {}", action.diff().x));
//!                 false
//!             })
//!             .on_click(move |_, _| clicks.borrow_mut().push("click".to_string())),
//!     )
//!     .unwrap();
//!
//! let at = |x: f64| InputEvent::Pointer(Contact::new(7, Point::new(x, 0.0)));
//!
//! assert!(engine.handle_start(&at(0.0)));
//! assert!(engine.handle_move(&at(3.0)));
//! engine.handle_end(&at(3.0));
//!
//! assert_eq!(*log.borrow(), ["move 3", "click"]);
//! ```
//!
//! ## Pinch and rotate
//!
//! A second contact that starts on the same element and selection as a live
//! action is *paired* with it. Paired moves report through `scale` and
//! `rotate` instead of the single-contact move handlers. The first paired move
//! only records a baseline. Later moves expose cumulative and incremental
//! values through [`Action::pinch`](action::Action::pinch) on the primary
//! action of the pair. A third contact on the same selection is refused.
//!
//! ## Features
//!
//! - `std` (default): use the standard library for floating-point math.
//! - `libm`: use `libm` for floating-point math in `no_std` builds.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod action;
pub mod binding;
pub mod config;
pub mod dispatch;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod resolve;
pub mod route;

mod engine;

pub use config::GestureConfig;
pub use engine::GestureEngine;
