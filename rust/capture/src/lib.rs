// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorwalk Capture
//!
//! Turns a stream of tracked 3D positions into a floor plan: distance-gated
//! path recording, user-marked corners and features, anchor placement, and
//! cross-session relocalization, orchestrated by a single-owner capture
//! engine.
//!
//! The engine is logically single-threaded: every mutating operation
//! read-modify-writes the same [`CaptureSession`], so hosts must serialize
//! calls (one task, or one mutex). No operation blocks or performs I/O.
//! Operations whose preconditions are unmet (typically: no current position
//! because tracking dropped out) are silent no-ops, never errors — a
//! technician mid-walk must not be interrupted by transient tracking loss.

pub mod engine;
pub mod heading;
pub mod reloc;
pub mod session;

pub use engine::{CaptureEngine, FeatureDetails};
pub use heading::{FixedHeading, HeadingSource};
pub use reloc::Relocalization;
pub use session::{AnchorPlacementState, CaptureSession, RecordingState};
