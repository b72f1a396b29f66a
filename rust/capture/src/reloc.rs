// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-session relocalization.
//!
//! A later mapping session has its own arbitrary coordinate origin. To
//! continue a plan captured earlier, the technician walks to a previously
//! placed anchor, faces the way its photo shows, and confirms "I am here".
//! The offset between where the anchor says that spot is and where the new
//! session thinks the technician stands is the translation needed to map
//! new-session coordinates onto the old frame; the heading difference is the
//! rotation offset.

use floorwalk_core::AnchorPoint;
use floorwalk_geometry::project;
use nalgebra::{Point2, Point3, Vector2};
use tracing::debug;

/// Relocalization sub-state of a capture session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relocalization {
    in_progress: bool,
    target: Option<AnchorPoint>,
    matched: bool,
    offset: Option<Vector2<f64>>,
    rotation_offset_degrees: Option<f64>,
}

impl Relocalization {
    /// Begin aligning against `anchor`. Resets any previous match.
    pub fn start(&mut self, anchor: AnchorPoint) {
        debug!(anchor = %anchor.label, "starting relocalization");
        *self = Relocalization {
            in_progress: true,
            target: Some(anchor),
            matched: false,
            offset: None,
            rotation_offset_degrees: None,
        };
    }

    /// The technician confirmed they are standing at the target anchor.
    ///
    /// Computes the translation from the new session's frame onto the
    /// anchor's frame and the compass rotation offset. No-op when no target
    /// anchor is set.
    pub fn confirm(&mut self, observed: &Point3<f64>, observed_heading_degrees: f64) {
        let Some(target) = &self.target else {
            return;
        };

        let offset = target.position2d - project(observed);
        let rotation = target.heading_degrees - observed_heading_degrees;
        debug!(
            dx = offset.x,
            dy = offset.y,
            rotation,
            "relocalization confirmed"
        );

        self.matched = true;
        self.offset = Some(offset);
        self.rotation_offset_degrees = Some(rotation);
    }

    /// Back to idle, dropping the target and any computed offsets.
    pub fn cancel(&mut self) {
        *self = Relocalization::default();
    }

    /// Translate a point from the current session's frame into the anchored
    /// frame. Identity while unmatched.
    pub fn apply_offset(&self, point: Point2<f64>) -> Point2<f64> {
        match self.offset {
            Some(offset) if self.matched => point + offset,
            _ => point,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub fn target(&self) -> Option<&AnchorPoint> {
        self.target.as_ref()
    }

    /// Heading correction for callers that also rotate points into the
    /// anchored frame. The engine does not rotate recorded points itself;
    /// merging rooms into one frame is a deferred alignment pass.
    pub fn rotation_offset_degrees(&self) -> Option<f64> {
        self.rotation_offset_degrees
    }
}
