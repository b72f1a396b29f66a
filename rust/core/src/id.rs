// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier generation for plans, pins, features, and anchors.
//!
//! Kept behind a trait so the geometry and capture logic stay deterministic
//! under test while production code gets random UUIDs.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of unique string identifiers.
pub trait IdGenerator: Send {
    fn next_id(&self) -> String;
}

/// Production generator: random UUID v4 per id.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator for tests: "id-1", "id-2", ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("id-{n}")
    }
}
