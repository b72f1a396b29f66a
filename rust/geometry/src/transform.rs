// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar rotation for aligning captured paths to a reference heading.

use nalgebra::Point2;

/// Rotate every point around the origin by `angle_degrees`.
///
/// Used to align a captured path to true north given the compass offset
/// measured at capture time.
pub fn rotate(points: &[Point2<f64>], angle_degrees: f64) -> Vec<Point2<f64>> {
    let radians = angle_degrees.to_radians();
    let (sin, cos) = radians.sin_cos();

    points
        .iter()
        .map(|p| Point2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quarter_turn_maps_x_axis_onto_y_axis() {
        let rotated = rotate(&[Point2::new(1.0, 0.0)], 90.0);
        assert_relative_eq!(rotated[0].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated[0].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let points = [Point2::new(2.5, -1.25), Point2::new(-3.0, 4.0)];
        let rotated = rotate(&points, 0.0);
        assert_eq!(rotated, points.to_vec());
    }

    #[test]
    fn full_turn_returns_to_start() {
        let rotated = rotate(&[Point2::new(3.0, 4.0)], 360.0);
        assert_relative_eq!(rotated[0].x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(rotated[0].y, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_preserves_distance_from_origin() {
        let p = Point2::new(3.0, 4.0);
        let rotated = rotate(&[p], 37.0);
        assert_relative_eq!(rotated[0].coords.norm(), 5.0, epsilon = 1e-12);
    }
}
