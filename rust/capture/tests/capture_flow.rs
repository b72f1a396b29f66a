// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end capture scenarios: walk a room, mark corners, finalize.

use approx::assert_relative_eq;
use floorwalk_capture::{
    AnchorPlacementState, CaptureEngine, FeatureDetails, FixedHeading, RecordingState,
};
use floorwalk_core::{FeatureKind, ManualClock, SequentialIds};
use nalgebra::{Point2, Point3};

const FLOOR_Y: f64 = -1.4;

fn engine_with_heading(heading: f64) -> CaptureEngine {
    CaptureEngine::new(
        Box::new(SequentialIds::default()),
        Box::new(ManualClock::at(1_700_000_000_000)),
        Box::new(FixedHeading(heading)),
    )
}

fn engine() -> CaptureEngine {
    engine_with_heading(0.0)
}

fn at(x: f64, z: f64) -> Point3<f64> {
    Point3::new(x, FLOOR_Y, z)
}

/// Walk the perimeter of a 4 m × 3 m room, marking each corner.
fn walk_square_room(engine: &mut CaptureEngine) {
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));

    for (x, z) in [(4.0, 0.0), (4.0, 3.0), (0.0, 3.0)] {
        // A few intermediate samples, then the corner itself.
        engine.update_position(at(x / 2.0, z / 2.0));
        engine.update_position(at(x, z));
        engine.mark_corner();
    }
    // Walk back toward the start before closing.
    engine.update_position(at(0.0, 0.3));
}

#[test]
fn square_room_closed_capture() {
    let mut engine = engine();
    walk_square_room(&mut engine);
    engine.stop_recording(true);

    assert_eq!(engine.session().recording_state, RecordingState::Completed);
    let plan = engine.plan().unwrap();
    assert!(plan.is_closed);
    assert_relative_eq!(plan.perimeter_meters.unwrap(), 14.0);
    assert_relative_eq!(plan.area_square_meters.unwrap(), 12.0);

    // Corners gained the duplicated closing vertex.
    assert_eq!(plan.corners.len(), 5);
    assert_eq!(plan.corners[4], plan.corners[0]);
}

#[test]
fn pins_are_labeled_start_corner_n_and_unlabeled_closing_duplicate() {
    let mut engine = engine();
    walk_square_room(&mut engine);
    engine.stop_recording(true);

    let pins = &engine.plan().unwrap().pins;
    assert_eq!(pins.len(), 5);
    assert_eq!(pins[0].label.as_deref(), Some("Start"));
    assert_eq!(pins[1].label.as_deref(), Some("Corner 1"));
    assert_eq!(pins[3].label.as_deref(), Some("Corner 3"));
    assert_eq!(pins[4].label, None);

    for pin in pins {
        assert_relative_eq!(pin.position3d.x, pin.position2d.x);
        assert_relative_eq!(pin.position3d.z, pin.position2d.y);
        assert_relative_eq!(pin.position3d.y, FLOOR_Y);
    }
}

#[test]
fn open_path_gets_an_end_label_and_no_area() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));
    engine.update_position(at(3.0, 0.0));
    engine.mark_corner();
    engine.update_position(at(3.0, 2.0));
    engine.mark_corner();
    engine.stop_recording(false);

    let plan = engine.plan().unwrap();
    assert!(!plan.is_closed);
    assert_eq!(plan.area_square_meters, None);
    assert_relative_eq!(plan.perimeter_meters.unwrap(), 5.0);

    let pins = &plan.pins;
    assert_eq!(pins.len(), 3);
    assert_eq!(pins[0].label.as_deref(), Some("Start"));
    assert_eq!(pins[1].label.as_deref(), Some("Corner 1"));
    assert_eq!(pins[2].label.as_deref(), Some("End"));
}

#[test]
fn admission_gate_rejects_sub_threshold_moves() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));

    engine.update_position(at(0.0, 0.05));
    engine.update_position(at(0.0, 0.2));

    let session = engine.session();
    assert_eq!(session.path_points.len(), 2); // start + (0, 0.2)
    assert_eq!(session.path_points[1], Point2::new(0.0, 0.2));
    assert_relative_eq!(session.distance_traveled_m, 0.2);
}

#[test]
fn repeated_identical_samples_do_not_double_count_distance() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));

    engine.update_position(at(0.0, 1.0));
    let once = engine.session().distance_traveled_m;
    engine.update_position(at(0.0, 1.0));
    assert_relative_eq!(engine.session().distance_traveled_m, once);
    assert_eq!(engine.session().path_points.len(), 2);
}

#[test]
fn sub_threshold_samples_still_refresh_live_position() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));

    engine.update_position(at(0.0, 0.05));
    let session = engine.session();
    assert_eq!(session.path_points.len(), 1);
    assert_eq!(session.current_position2d, Some(Point2::new(0.0, 0.05)));
    assert_relative_eq!(session.distance_to_start_m.unwrap(), 0.05);
}

#[test]
fn near_start_requires_both_proximity_and_travel() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));
    assert!(!engine.is_near_start()); // trivially at start, no travel yet

    // Walk out 1.5 m and back: ~3 m traveled, 0.3 m from start.
    for z in [0.5, 1.0, 1.5, 1.0, 0.5, 0.3] {
        engine.update_position(at(0.0, z));
    }
    assert!(engine.session().distance_traveled_m > 2.0);
    assert!(engine.is_near_start());
}

#[test]
fn near_start_is_suppressed_with_little_travel() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));

    engine.update_position(at(0.0, 0.5));
    engine.update_position(at(0.0, 0.1));
    assert!(engine.session().distance_traveled_m < 2.0);
    assert!(!engine.is_near_start());
}

#[test]
fn updates_are_ignored_while_not_recording() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.update_position(at(1.0, 1.0));
    assert!(engine.session().path_points.is_empty());

    engine.mark_corner();
    assert!(engine.session().corners.is_empty());
}

#[test]
fn features_are_placed_at_the_live_position() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));
    engine.update_position(at(2.0, 1.0));

    engine.show_feature_picker();
    let id = engine
        .add_feature(
            FeatureKind::Damper,
            FeatureDetails {
                label: Some("VAV-3".to_string()),
                linked_device_id: Some("AA:BB:CC:DD:EE:FF".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let session = engine.session();
    assert!(!session.show_feature_picker); // picker closed as a side effect
    let feature = &session.features[0];
    assert_eq!(feature.id, id);
    assert_eq!(feature.position2d, Point2::new(2.0, 1.0));
    assert_eq!(feature.label.as_deref(), Some("VAV-3"));

    engine.remove_feature(&id);
    assert!(engine.session().features.is_empty());
}

#[test]
fn add_feature_without_position_is_a_no_op() {
    let mut engine = engine();
    engine.start_capture(None);
    assert!(engine
        .add_feature(FeatureKind::Door, FeatureDetails::default())
        .is_none());
    assert!(engine.session().features.is_empty());
}

#[test]
fn feature_photo_flow_attaches_the_photo() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));
    let id = engine
        .add_feature(FeatureKind::PhotoPoint, FeatureDetails::default())
        .unwrap();

    engine.request_feature_photo(id.clone());
    engine.save_feature_photo("photos/unit.jpg");

    let feature = &engine.session().features[0];
    assert_eq!(feature.photo_ref.as_deref(), Some("photos/unit.jpg"));
    assert_eq!(engine.session().pending_feature_photo_id, None);
}

#[test]
fn anchor_flow_requires_confirmed_position_before_save() {
    let mut engine = engine_with_heading(90.0);
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));
    engine.update_position(at(1.0, 0.5));

    engine.start_anchor_placement("Doorway");
    assert_eq!(
        engine.session().anchor_placement,
        AnchorPlacementState::Positioning
    );

    // Saving before confirming the position is ignored.
    engine.save_anchor("photos/door.jpg");
    assert!(engine.session().anchors.is_empty());

    engine.confirm_anchor_position();
    engine.save_anchor("photos/door.jpg");

    let session = engine.session();
    assert_eq!(session.anchor_placement, AnchorPlacementState::Confirmed);
    let anchor = &session.anchors[0];
    assert_eq!(anchor.label, "Doorway");
    assert_eq!(anchor.photo_ref, "photos/door.jpg");
    assert_relative_eq!(anchor.heading_degrees, 90.0);
    assert_eq!(anchor.position2d, Point2::new(1.0, 0.5));

    engine.finish_anchor_placement();
    assert_eq!(engine.session().anchor_placement, AnchorPlacementState::None);
}

#[test]
fn cancel_anchor_placement_clears_the_pending_label() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_anchor_placement("Closet door");
    engine.cancel_anchor_placement();

    let session = engine.session();
    assert_eq!(session.anchor_placement, AnchorPlacementState::None);
    assert_eq!(session.pending_anchor_label, None);
}

#[test]
fn relocalization_against_a_stored_anchor() {
    // First session: place an anchor at (5, 5) facing 90°.
    let mut first = engine_with_heading(90.0);
    first.start_capture(None);
    first.start_recording(at(5.0, 5.0));
    first.start_anchor_placement("Doorway");
    first.confirm_anchor_position();
    first.save_anchor("photos/door.jpg");
    first.stop_recording(false);
    let plan = first.plan().unwrap().clone();

    // Second session: resume the plan, stand at what it thinks is (4, 4)
    // facing 80°.
    let mut second = engine_with_heading(80.0);
    second.start_capture(Some(plan));
    let anchor = second.anchors()[0].clone();
    second.start_relocalization(anchor);
    second.confirm_relocalization(at(4.0, 4.0));

    let reloc = &second.session().relocalization;
    assert!(reloc.is_matched());
    assert_relative_eq!(reloc.rotation_offset_degrees().unwrap(), 10.0);

    let aligned = second.apply_relocalization_offset(Point2::new(4.0, 4.0));
    assert_relative_eq!(aligned.x, 5.0);
    assert_relative_eq!(aligned.y, 5.0);

    second.cancel_relocalization();
    let p = Point2::new(4.0, 4.0);
    assert_eq!(second.apply_relocalization_offset(p), p);
}

#[test]
fn reset_discards_the_session_but_keeps_the_plan() {
    let mut engine = engine();
    walk_square_room(&mut engine);
    let _ = engine.add_feature(FeatureKind::Vent, FeatureDetails::default());
    engine.reset_recording();

    let session = engine.session();
    assert_eq!(session.recording_state, RecordingState::Idle);
    assert!(session.path_points.is_empty());
    assert!(session.corners.is_empty());
    assert!(session.features.is_empty());
    assert_eq!(session.distance_traveled_m, 0.0);
    assert!(engine.plan().is_some());
}

#[test]
fn closing_with_too_few_corners_leaves_the_plan_open() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));
    engine.update_position(at(2.0, 0.0));
    engine.mark_corner();
    // Only start + one corner: no polygon to close.
    engine.stop_recording(true);

    let plan = engine.plan().unwrap();
    assert!(!plan.is_closed);
    assert_eq!(plan.area_square_meters, None);
    assert!(plan.perimeter_meters.is_some());
}

#[test]
fn resumed_corners_are_visible_until_recording_restarts() {
    let mut first = engine();
    walk_square_room(&mut first);
    first.stop_recording(true);
    let plan = first.plan().unwrap().clone();

    let mut second = engine();
    second.start_capture(Some(plan));
    // Before recording, the session snapshot shows the stored plan, so the
    // host can render it while the technician relocalizes.
    assert_eq!(second.session().corners.len(), 5);
    assert_eq!(second.session().pins.len(), 5);

    // A new recording starts its own corner list at the new start point.
    second.start_recording(at(1.0, 1.0));
    assert_eq!(second.session().corners, vec![Point2::new(1.0, 1.0)]);
}

#[test]
fn stop_recording_is_a_no_op_when_idle() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.stop_recording(true);
    assert_eq!(engine.session().recording_state, RecordingState::Idle);
    assert_eq!(engine.plan().unwrap().perimeter_meters, None);
}

#[test]
fn finalization_smooths_the_stored_path() {
    let mut engine = engine();
    engine.start_capture(None);
    engine.start_recording(at(0.0, 0.0));
    // Zig-zag walk: smoothing should pull the spike toward the line.
    engine.update_position(at(1.0, 0.0));
    engine.update_position(at(2.0, 0.4));
    engine.update_position(at(3.0, 0.0));
    engine.update_position(at(4.0, 0.0));
    let spike_before = engine.session().path_points[2].y;
    engine.stop_recording(false);
    let spike_after = engine.session().path_points[2].y;
    assert!(spike_after < spike_before);
}

#[test]
fn finalized_plan_round_trips_through_the_portable_format() {
    let mut engine = engine_with_heading(12.5);
    walk_square_room(&mut engine);
    let _ = engine.add_feature(
        FeatureKind::Thermostat,
        FeatureDetails {
            label: Some("T-1".to_string()),
            ..Default::default()
        },
    );
    engine.stop_recording(true);

    let plan = engine.plan().unwrap();
    let restored = floorwalk_core::import_plan(&floorwalk_core::export_plan(plan)).unwrap();
    assert_eq!(&restored, plan);
}
