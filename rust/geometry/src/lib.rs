// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorwalk Geometry
//!
//! Pure planar geometry over ordered point sequences: perimeter, Shoelace
//! area, centroid, bounding box, heading rotation, and path smoothing.
//! Everything here is stateless and safe to call from any thread.

pub mod path;
pub mod polygon;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use path::smooth;
pub use polygon::{area, bounding_box, centroid, distance, is_valid_polygon, perimeter, BoundingBox};
pub use transform::rotate;

/// Project a tracked 3D position onto the floor plane.
///
/// The vertical axis (y) is dropped; the 3D z axis becomes the planar y axis,
/// matching the convention of the motion-tracking feed.
#[inline]
pub fn project(position: &Point3<f64>) -> Point2<f64> {
    Point2::new(position.x, position.z)
}
