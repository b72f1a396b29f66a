// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ephemeral capture-session state.
//!
//! One [`CaptureSession`] exists per active capture. It is owned exclusively
//! by the [`crate::CaptureEngine`] and mutated only through its operations;
//! external callers read snapshots. It is never persisted: on finalize its
//! contents fold into a [`floorwalk_core::FloorPlan`], on reset it is
//! discarded wholesale.

use floorwalk_core::{AnchorPoint, FeatureMarker, FloorPlan, Pin};
use nalgebra::{Point2, Point3};

use crate::reloc::Relocalization;

/// Lifecycle of the recording state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    /// Not recording, waiting for the user to start.
    #[default]
    Idle,
    /// Actively recording the walked path.
    Recording,
    /// Recording finished and finalized.
    Completed,
}

/// Anchor placement sub-flow: walk to the spot, confirm it, photograph it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorPlacementState {
    #[default]
    None,
    /// User is walking to the anchor position.
    Positioning,
    /// Position confirmed; waiting for the reference photo.
    Capturing,
    /// Anchor saved.
    Confirmed,
}

/// All in-progress mutable capture data.
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    pub recording_state: RecordingState,
    /// Automatically sampled path, thinned by the admission gate.
    pub path_points: Vec<Point2<f64>>,
    /// User-marked perimeter corners; corner #0 is always the start point.
    pub corners: Vec<Point2<f64>>,
    pub corners3d: Vec<Point3<f64>>,
    pub features: Vec<FeatureMarker>,
    pub anchors: Vec<AnchorPoint>,
    /// Pins from the last finalization, or carried over from a resumed plan.
    pub pins: Vec<Pin>,
    pub start_position2d: Option<Point2<f64>>,
    pub start_position3d: Option<Point3<f64>>,
    /// Live position, refreshed on every sample regardless of admission.
    pub current_position2d: Option<Point2<f64>>,
    pub current_position3d: Option<Point3<f64>>,
    pub distance_traveled_m: f64,
    pub distance_to_start_m: Option<f64>,
    pub anchor_placement: AnchorPlacementState,
    pub pending_anchor_label: Option<String>,
    pub relocalization: Relocalization,
    /// Feature awaiting a photo from the host camera flow.
    pub pending_feature_photo_id: Option<String>,
    /// Host UI flag: the feature-kind picker is open.
    pub show_feature_picker: bool,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session resuming an existing plan: its pins and corners are carried
    /// in so the host can show the stored plan while the technician
    /// relocalizes. A new recording re-seeds `corners` from its own start
    /// point; the carried data is snapshot state, not a prefix of the next
    /// walk.
    pub fn resume_from(plan: &FloorPlan) -> Self {
        Self {
            pins: plan.pins.clone(),
            corners: plan.corners.clone(),
            ..Self::default()
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording_state == RecordingState::Recording
    }
}
