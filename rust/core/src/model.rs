// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor-plan aggregate and its entities.
//!
//! All distances are meters, all angles degrees, all timestamps milliseconds
//! since the Unix epoch. 2D positions are the planar projection of tracked
//! 3D positions (vertical axis dropped). Entities never mint their own ids
//! or timestamps; callers supply them through [`crate::IdGenerator`] and
//! [`crate::Clock`].

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::id::IdGenerator;

/// A finalized vertex of a captured floor plan.
///
/// Immutable once created; `position2d` is always the planar projection of
/// `position3d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: String,
    pub position3d: Point3<f64>,
    pub position2d: Point2<f64>,
    pub placed_at_ms: i64,
    pub label: Option<String>,
    pub on_detected_surface: bool,
}

/// Kinds of equipment or points of interest tagged during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Door,
    Beacon,
    Damper,
    Vent,
    Unit,
    Thermostat,
    PhotoPoint,
    Other,
}

impl FeatureKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureKind::Door => "Door",
            FeatureKind::Beacon => "Beacon",
            FeatureKind::Damper => "Damper",
            FeatureKind::Vent => "HVAC Vent",
            FeatureKind::Unit => "HVAC Unit",
            FeatureKind::Thermostat => "Thermostat",
            FeatureKind::PhotoPoint => "Photo Point",
            FeatureKind::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FeatureKind::Door => "🚪",
            FeatureKind::Beacon => "📡",
            FeatureKind::Damper => "🌀",
            FeatureKind::Vent => "💨",
            FeatureKind::Unit => "❄️",
            FeatureKind::Thermostat => "🌡️",
            FeatureKind::PhotoPoint => "📷",
            FeatureKind::Other => "📍",
        }
    }
}

/// A feature (equipment, opening, point of interest) marked at a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMarker {
    pub id: String,
    pub kind: FeatureKind,
    pub position2d: Point2<f64>,
    pub position3d: Option<Point3<f64>>,
    pub label: Option<String>,
    /// Reference to an attached photo (opaque to this crate).
    pub photo_ref: Option<String>,
    /// For beacons: address of the linked Bluetooth device.
    pub linked_device_id: Option<String>,
    pub linked_device_name: Option<String>,
    pub notes: Option<String>,
    pub created_at_ms: i64,
}

/// A relocalization waypoint: position, compass heading, and a mandatory
/// reference photo. An anchor without its photo cannot be reused to resume
/// mapping, so `photo_ref` is not optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub id: String,
    pub position2d: Point2<f64>,
    pub position3d: Point3<f64>,
    pub heading_degrees: f64,
    pub photo_ref: String,
    pub label: String,
    /// Plan this anchor links toward, when it bridges two rooms.
    pub linked_plan_id: Option<String>,
    pub created_at_ms: i64,
}

/// The persisted floor-plan aggregate.
///
/// Invariant: `perimeter_meters`/`area_square_meters` are either both unset
/// or reflect `corners` as of the last finalization. `is_closed` implies at
/// least 3 corners with the walked path returning to the first corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: String,
    pub name: String,
    pub created_at_ms: i64,
    pub modified_at_ms: i64,
    pub pins: Vec<Pin>,
    /// User-marked perimeter corners, sparser and cleaner than the raw path.
    pub corners: Vec<Point2<f64>>,
    pub features: Vec<FeatureMarker>,
    pub anchors: Vec<AnchorPoint>,
    /// Compass heading at finalization, for rotating the plan to true north.
    pub reference_heading_degrees: f64,
    /// Vertical coordinate of the floor in the capture session's frame.
    pub reference_floor_y: f64,
    pub perimeter_meters: Option<f64>,
    pub area_square_meters: Option<f64>,
    pub is_closed: bool,
}

impl FloorPlan {
    /// Create an empty plan stamped with a fresh id and the current time.
    pub fn new(name: impl Into<String>, ids: &dyn IdGenerator, clock: &dyn Clock) -> Self {
        let now = clock.now_ms();
        Self {
            id: ids.next_id(),
            name: name.into(),
            created_at_ms: now,
            modified_at_ms: now,
            pins: Vec::new(),
            corners: Vec::new(),
            features: Vec::new(),
            anchors: Vec::new(),
            reference_heading_degrees: 0.0,
            reference_floor_y: 0.0,
            perimeter_meters: None,
            area_square_meters: None,
            is_closed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::id::SequentialIds;

    #[test]
    fn new_plan_is_empty_and_stamped() {
        let ids = SequentialIds::default();
        let clock = ManualClock::at(42_000);
        let plan = FloorPlan::new("Mechanical Room", &ids, &clock);

        assert_eq!(plan.id, "id-1");
        assert_eq!(plan.name, "Mechanical Room");
        assert_eq!(plan.created_at_ms, 42_000);
        assert_eq!(plan.modified_at_ms, 42_000);
        assert!(plan.pins.is_empty());
        assert!(!plan.is_closed);
        assert_eq!(plan.perimeter_meters, None);
        assert_eq!(plan.area_square_meters, None);
    }

    #[test]
    fn feature_kind_labels() {
        assert_eq!(FeatureKind::Damper.display_name(), "Damper");
        assert_eq!(FeatureKind::Vent.display_name(), "HVAC Vent");
        assert_eq!(FeatureKind::Beacon.icon(), "📡");
    }
}
