// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorwalk Core
//!
//! The floor-plan aggregate and its collaborators: serde-backed data model,
//! portable JSON exchange format, injected id/clock abstractions, and the
//! plan store contract with an in-memory reference implementation.

pub mod clock;
pub mod error;
pub mod id;
pub mod model;
pub mod portable;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use id::{IdGenerator, SequentialIds, UuidIds};
pub use model::{AnchorPoint, FeatureKind, FeatureMarker, FloorPlan, Pin};
pub use portable::{export_plan, import_plan};
pub use store::{MemoryStore, PlanStore};
