// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Portable floor-plan exchange format.
//!
//! A versioned JSON document mirroring the [`FloorPlan`] aggregate field for
//! field: meters for distances, degrees for angles, epoch milliseconds for
//! timestamps. Export then import reproduces an equivalent plan. Malformed
//! or version-mismatched input is a recoverable error and never touches
//! existing state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::FloorPlan;

/// Current document version. Bump on breaking schema changes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PortableDocument {
    version: u32,
    plan: FloorPlan,
}

/// Serialize a plan to the portable JSON document.
pub fn export_plan(plan: &FloorPlan) -> Vec<u8> {
    let doc = PortableDocument {
        version: FORMAT_VERSION,
        plan: plan.clone(),
    };
    // FloorPlan contains only serde-friendly fields, so this cannot fail.
    serde_json::to_vec_pretty(&doc).unwrap_or_default()
}

/// Parse a portable JSON document back into a plan.
pub fn import_plan(bytes: &[u8]) -> Result<FloorPlan> {
    let doc: PortableDocument = serde_json::from_slice(bytes)?;
    if doc.version > FORMAT_VERSION {
        return Err(Error::UnsupportedVersion(doc.version));
    }
    Ok(doc.plan)
}
