// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

/// Tunables for a [`GestureEngine`](crate::GestureEngine).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Per-axis cumulative travel (in event-space units) below which a release
    /// is reported as a click.
    ///
    /// Both axes must stay strictly below this value.
    pub click_slop: f64,
}

impl GestureConfig {
    /// Default click tolerance in event-space units.
    pub const DEFAULT_CLICK_SLOP: f64 = 10.0;

    /// Returns a configuration with the given click tolerance.
    #[must_use]
    pub const fn with_click_slop(mut self, click_slop: f64) -> Self {
        self.click_slop = click_slop;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_slop: Self::DEFAULT_CLICK_SLOP,
        }
    }
}
