// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The capture state machine.
//!
//! Owns the [`CaptureSession`] and the target [`FloorPlan`], and is the only
//! writer of either. Recording runs Idle → Recording → Completed; reset
//! returns to Idle from anywhere. Position samples pass a minimum-
//! displacement admission gate so path density stays bounded no matter how
//! fast the tracking feed runs; the live position is refreshed on every
//! sample so near-start feedback and corner marking stay responsive.

use floorwalk_core::{
    AnchorPoint, Clock, FeatureKind, FeatureMarker, FloorPlan, IdGenerator, Pin,
};
use floorwalk_geometry::{self as geometry, project};
use nalgebra::{Point2, Point3};
use tracing::{debug, info};

use crate::heading::HeadingSource;
use crate::session::{AnchorPlacementState, CaptureSession, RecordingState};

/// Minimum displacement before a sample is admitted to the path (m).
/// Bounds point density independent of the feed's sample rate.
const MIN_DISTANCE_BETWEEN_POINTS: f64 = 0.15;

/// Distance to the start point that counts as "back at start" (m).
const CLOSE_TO_START_THRESHOLD: f64 = 0.5;

/// Travel required before near-start can trigger; at t=0 the distance to
/// start is trivially zero.
const MIN_TRAVEL_BEFORE_CLOSE: f64 = 2.0;

/// Moving-average window applied to the raw path at finalization.
const SMOOTHING_WINDOW: usize = 3;

/// Optional detail for a feature marker placed during a walk.
#[derive(Debug, Clone, Default)]
pub struct FeatureDetails {
    pub label: Option<String>,
    pub photo_ref: Option<String>,
    pub linked_device_id: Option<String>,
    pub linked_device_name: Option<String>,
    pub notes: Option<String>,
}

/// Orchestrates one floor-plan capture from first step to finalized plan.
pub struct CaptureEngine {
    session: CaptureSession,
    plan: Option<FloorPlan>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    heading: Box<dyn HeadingSource>,
}

impl CaptureEngine {
    pub fn new(
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
        heading: Box<dyn HeadingSource>,
    ) -> Self {
        Self {
            session: CaptureSession::new(),
            plan: None,
            ids,
            clock,
            heading,
        }
    }

    /// Begin a capture, either fresh or resuming an existing plan whose
    /// stored pins and corners seed the session.
    pub fn start_capture(&mut self, existing: Option<FloorPlan>) {
        self.session = match &existing {
            Some(plan) => CaptureSession::resume_from(plan),
            None => CaptureSession::new(),
        };
        self.plan = Some(existing.unwrap_or_else(|| {
            FloorPlan::new(
                format!("Floor Plan {}", self.clock.now_ms()),
                self.ids.as_ref(),
                self.clock.as_ref(),
            )
        }));
        if let Some(plan) = &self.plan {
            info!(plan = %plan.name, "capture started");
        }
    }

    /// Snapshot of the in-progress session.
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// The plan this capture targets; updated at finalization.
    pub fn plan(&self) -> Option<&FloorPlan> {
        self.plan.as_ref()
    }

    pub fn update_plan_name(&mut self, name: impl Into<String>) {
        if let Some(plan) = &mut self.plan {
            plan.name = name.into();
        }
    }

    /// Anchors available for relocalization on the target plan.
    pub fn anchors(&self) -> &[AnchorPoint] {
        self.plan.as_ref().map(|p| p.anchors.as_slice()).unwrap_or(&[])
    }

    // ---- Path recording ------------------------------------------------

    /// Start recording the walked path. The start point is admitted to the
    /// path immediately and is always corner #0.
    pub fn start_recording(&mut self, initial_position: Point3<f64>) {
        let start = project(&initial_position);
        info!(x = start.x, y = start.y, "recording started");

        self.session.recording_state = RecordingState::Recording;
        self.session.path_points = vec![start];
        self.session.corners = vec![start];
        self.session.corners3d = vec![initial_position];
        self.session.start_position2d = Some(start);
        self.session.start_position3d = Some(initial_position);
        self.session.current_position2d = Some(start);
        self.session.current_position3d = Some(initial_position);
        self.session.distance_traveled_m = 0.0;
        self.session.distance_to_start_m = Some(0.0);
    }

    /// Feed one tracked position sample.
    ///
    /// The live position and distance-to-start are refreshed on every call;
    /// the sample joins the stored path only if it moved at least
    /// [`MIN_DISTANCE_BETWEEN_POINTS`] from the last admitted point. O(1)
    /// per call either way.
    pub fn update_position(&mut self, position3d: Point3<f64>) {
        let session = &mut self.session;
        if session.recording_state != RecordingState::Recording {
            return;
        }
        let Some(last) = session.path_points.last().copied() else {
            return;
        };

        let point = project(&position3d);
        let dist_from_last = geometry::distance(&last, &point);
        let dist_to_start = session
            .start_position2d
            .map(|start| geometry::distance(&point, &start))
            .unwrap_or(0.0);

        if dist_from_last >= MIN_DISTANCE_BETWEEN_POINTS {
            session.distance_traveled_m += dist_from_last;
            session.path_points.push(point);
            debug!(
                count = session.path_points.len(),
                step = dist_from_last,
                total = session.distance_traveled_m,
                "path point admitted"
            );
        }

        session.current_position2d = Some(point);
        session.current_position3d = Some(position3d);
        session.distance_to_start_m = Some(dist_to_start);
    }

    /// Whether the technician is back at the start and may close the loop.
    /// Requires some travel first so the trivially-zero distance right
    /// after starting does not count.
    pub fn is_near_start(&self) -> bool {
        let Some(dist) = self.session.distance_to_start_m else {
            return false;
        };
        dist < CLOSE_TO_START_THRESHOLD && self.session.distance_traveled_m > MIN_TRAVEL_BEFORE_CLOSE
    }

    // ---- Corners and features ------------------------------------------

    /// Mark the current live position as a perimeter corner. No-op while
    /// not recording or when tracking has not produced a position yet.
    pub fn mark_corner(&mut self) {
        if !self.session.is_recording() {
            return;
        }
        let Some(pos) = self.session.current_position2d else {
            return;
        };
        debug!(n = self.session.corners.len() + 1, x = pos.x, y = pos.y, "corner marked");

        self.session.corners.push(pos);
        if let Some(pos3d) = self.session.current_position3d {
            self.session.corners3d.push(pos3d);
        }
    }

    pub fn show_feature_picker(&mut self) {
        self.session.show_feature_picker = true;
    }

    pub fn hide_feature_picker(&mut self) {
        self.session.show_feature_picker = false;
    }

    /// Place a feature marker at the current live position. No-op without a
    /// position. Closes the feature picker. Returns the new feature's id.
    pub fn add_feature(&mut self, kind: FeatureKind, details: FeatureDetails) -> Option<String> {
        let pos = self.session.current_position2d?;

        let feature = FeatureMarker {
            id: self.ids.next_id(),
            kind,
            position2d: pos,
            position3d: self.session.current_position3d,
            label: details.label,
            photo_ref: details.photo_ref,
            linked_device_id: details.linked_device_id,
            linked_device_name: details.linked_device_name,
            notes: details.notes,
            created_at_ms: self.clock.now_ms(),
        };
        debug!(kind = feature.kind.display_name(), x = pos.x, y = pos.y, "feature added");

        let id = feature.id.clone();
        self.session.features.push(feature);
        self.session.show_feature_picker = false;
        Some(id)
    }

    pub fn remove_feature(&mut self, feature_id: &str) {
        self.session.features.retain(|f| f.id != feature_id);
    }

    pub fn update_feature_photo(&mut self, feature_id: &str, photo_ref: Option<String>) {
        if let Some(feature) = self.session.features.iter_mut().find(|f| f.id == feature_id) {
            feature.photo_ref = photo_ref;
        }
    }

    /// Ask the host camera flow for a photo of an already-placed feature.
    pub fn request_feature_photo(&mut self, feature_id: impl Into<String>) {
        self.session.pending_feature_photo_id = Some(feature_id.into());
    }

    /// Attach the captured photo to the pending feature.
    pub fn save_feature_photo(&mut self, photo_ref: impl Into<String>) {
        let Some(feature_id) = self.session.pending_feature_photo_id.take() else {
            return;
        };
        self.update_feature_photo(&feature_id, Some(photo_ref.into()));
    }

    pub fn cancel_feature_photo(&mut self) {
        self.session.pending_feature_photo_id = None;
    }

    // ---- Anchor placement ----------------------------------------------

    /// Begin placing a relocalization anchor: the user walks to the spot.
    pub fn start_anchor_placement(&mut self, label: impl Into<String>) {
        self.session.anchor_placement = AnchorPlacementState::Positioning;
        self.session.pending_anchor_label = Some(label.into());
    }

    /// The user is standing at the anchor spot; next step is the photo.
    pub fn confirm_anchor_position(&mut self) {
        if self.session.anchor_placement == AnchorPlacementState::Positioning {
            self.session.anchor_placement = AnchorPlacementState::Capturing;
        }
    }

    /// Save the anchor with its mandatory reference photo, stamped with the
    /// live compass heading. No-op unless the position was confirmed first
    /// and tracking is currently delivering a position.
    pub fn save_anchor(&mut self, photo_ref: impl Into<String>) {
        if self.session.anchor_placement != AnchorPlacementState::Capturing {
            return;
        }
        let (Some(pos), Some(pos3d)) = (
            self.session.current_position2d,
            self.session.current_position3d,
        ) else {
            return;
        };

        let heading = self.heading.heading_degrees();
        let label = self
            .session
            .pending_anchor_label
            .take()
            .unwrap_or_else(|| "Anchor".to_string());
        info!(label = %label, heading, "anchor saved");

        self.session.anchors.push(AnchorPoint {
            id: self.ids.next_id(),
            position2d: pos,
            position3d: pos3d,
            heading_degrees: heading,
            photo_ref: photo_ref.into(),
            label,
            linked_plan_id: None,
            created_at_ms: self.clock.now_ms(),
        });
        self.session.anchor_placement = AnchorPlacementState::Confirmed;
    }

    pub fn cancel_anchor_placement(&mut self) {
        self.session.anchor_placement = AnchorPlacementState::None;
        self.session.pending_anchor_label = None;
    }

    /// Dismiss the confirmed-anchor state once the host UI has shown it.
    pub fn finish_anchor_placement(&mut self) {
        self.session.anchor_placement = AnchorPlacementState::None;
    }

    // ---- Relocalization ------------------------------------------------

    /// Begin aligning this session to a previously placed anchor.
    pub fn start_relocalization(&mut self, anchor: AnchorPoint) {
        self.session.relocalization.start(anchor);
    }

    /// The user confirmed they stand at the target anchor; the compass is
    /// polled and the translation/rotation offsets computed.
    pub fn confirm_relocalization(&mut self, observed_position3d: Point3<f64>) {
        let heading = self.heading.heading_degrees();
        self.session
            .relocalization
            .confirm(&observed_position3d, heading);
    }

    pub fn cancel_relocalization(&mut self) {
        self.session.relocalization.cancel();
    }

    /// Translate a point into the anchored frame; identity when no
    /// relocalization is matched.
    pub fn apply_relocalization_offset(&self, point: Point2<f64>) -> Point2<f64> {
        self.session.relocalization.apply_offset(point)
    }

    // ---- Finalization --------------------------------------------------

    /// Stop recording and finalize the path into the target plan.
    ///
    /// Smooths the raw path, optionally closes the loop by duplicating the
    /// first path point and corner, builds labeled pins from the corners,
    /// and computes perimeter and area over the corners (the clean floor
    /// plan, not the dense path). No-op unless currently recording.
    pub fn stop_recording(&mut self, close_path: bool) {
        if !self.session.is_recording() {
            return;
        }

        let mut path_points = geometry::smooth(&self.session.path_points, SMOOTHING_WINDOW);
        let mut corners = self.session.corners.clone();

        if close_path {
            if path_points.len() >= 3 {
                path_points.push(path_points[0]);
            }
            if corners.len() >= 2 {
                corners.push(corners[0]);
            }
        }

        info!(
            corners = corners.len(),
            path_points = path_points.len(),
            close_path,
            "recording stopped"
        );

        let floor_y = self.session.start_position3d.map(|p| p.y).unwrap_or(0.0);
        let placed_at = self.clock.now_ms();
        let last = corners.len().saturating_sub(1);
        let pins: Vec<Pin> = corners
            .iter()
            .enumerate()
            .map(|(index, point)| Pin {
                id: self.ids.next_id(),
                position3d: Point3::new(point.x, floor_y, point.y),
                position2d: *point,
                placed_at_ms: placed_at,
                label: match index {
                    0 => Some("Start".to_string()),
                    i if i == last => (!close_path).then(|| "End".to_string()),
                    i => Some(format!("Corner {i}")),
                },
                on_detected_surface: true,
            })
            .collect();

        // Perimeter and area come from the user-marked corners. Area is
        // meaningless for an open path, and the duplicated closing corner
        // must not enter the Shoelace sum.
        let perimeter = (corners.len() >= 2).then(|| geometry::perimeter(&corners, close_path));
        let area = (close_path && corners.len() >= 4)
            .then(|| geometry::area(&corners[..corners.len() - 1]));
        // A closed plan needs at least 3 distinct corners (4 with the
        // duplicated closing vertex); a close request on fewer stays open.
        let is_closed = close_path && corners.len() >= 4;

        self.session.path_points = path_points;
        self.session.corners = corners.clone();
        self.session.pins = pins.clone();
        self.session.recording_state = RecordingState::Completed;

        if let Some(plan) = &mut self.plan {
            plan.pins = pins;
            plan.corners = corners;
            plan.features.extend(self.session.features.iter().cloned());
            plan.anchors.extend(self.session.anchors.iter().cloned());
            plan.perimeter_meters = perimeter;
            plan.area_square_meters = area;
            plan.is_closed = is_closed;
            plan.reference_heading_degrees = self.heading.heading_degrees();
            plan.reference_floor_y = floor_y;
            plan.modified_at_ms = placed_at;
        }
    }

    /// Discard the session and return to Idle. Unsaved corners, features,
    /// anchors, and path points are lost; the target plan is kept.
    pub fn reset_recording(&mut self) {
        info!("recording reset");
        self.session = CaptureSession::new();
    }
}
