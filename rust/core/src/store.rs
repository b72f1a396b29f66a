// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan persistence contract.
//!
//! The capture engine hands finished plans to a [`PlanStore`] and never
//! retries failed saves itself; durability is the store's problem. The
//! in-memory [`MemoryStore`] is the reference implementation and the test
//! double; hosts supply file- or database-backed stores behind the same
//! trait.

use rustc_hash::FxHashMap;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::model::FloorPlan;
use crate::portable::{export_plan, import_plan};

/// Durable home for finished floor plans.
pub trait PlanStore {
    /// Insert or update a plan, stamping its modification time. Returns the
    /// plan id.
    fn save(&mut self, plan: FloorPlan) -> String;

    fn get_by_id(&self, id: &str) -> Option<FloorPlan>;

    /// Remove a plan. Returns whether it existed.
    fn delete(&mut self, id: &str) -> bool;

    /// All stored plans, most recently modified first.
    fn list_all(&self) -> Vec<FloorPlan>;

    /// Export a stored plan to the portable document format.
    fn export_portable(&self, id: &str) -> Result<Vec<u8>> {
        let plan = self
            .get_by_id(id)
            .ok_or_else(|| Error::PlanNotFound(id.to_string()))?;
        Ok(export_plan(&plan))
    }

    /// Import a portable document and store it. Malformed input leaves the
    /// store untouched.
    fn import_portable(&mut self, bytes: &[u8]) -> Result<FloorPlan> {
        let plan = import_plan(bytes)?;
        self.save(plan.clone());
        Ok(plan)
    }
}

/// In-memory plan store keyed by plan id.
pub struct MemoryStore {
    plans: FxHashMap<String, FloorPlan>,
    clock: Box<dyn Clock>,
}

impl MemoryStore {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            plans: FxHashMap::default(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl PlanStore for MemoryStore {
    fn save(&mut self, mut plan: FloorPlan) -> String {
        plan.modified_at_ms = self.clock.now_ms();
        let id = plan.id.clone();
        self.plans.insert(id.clone(), plan);
        id
    }

    fn get_by_id(&self, id: &str) -> Option<FloorPlan> {
        self.plans.get(id).cloned()
    }

    fn delete(&mut self, id: &str) -> bool {
        self.plans.remove(id).is_some()
    }

    fn list_all(&self) -> Vec<FloorPlan> {
        let mut plans: Vec<_> = self.plans.values().cloned().collect();
        plans.sort_by(|a, b| b.modified_at_ms.cmp(&a.modified_at_ms));
        plans
    }
}
