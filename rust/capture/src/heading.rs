// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Compass heading source.
//!
//! The engine never subscribes to heading updates; it polls at three
//! discrete moments: session finalize, anchor save, and relocalization
//! confirm. Hosts wrap their sensor stack behind this trait.

/// Polled device orientation.
pub trait HeadingSource: Send {
    /// Compass heading in degrees, [0, 360), 0 = true north.
    fn heading_degrees(&self) -> f64;

    /// Forward/backward tilt in degrees.
    fn pitch_degrees(&self) -> f64 {
        0.0
    }

    /// Left/right tilt in degrees.
    fn roll_degrees(&self) -> f64 {
        0.0
    }

    /// Whether the underlying sensors are present and calibrated.
    fn is_available(&self) -> bool {
        true
    }
}

/// Constant heading, for tests and headless hosts.
#[derive(Debug, Clone, Copy)]
pub struct FixedHeading(pub f64);

impl HeadingSource for FixedHeading {
    fn heading_degrees(&self) -> f64 {
        self.0
    }
}
