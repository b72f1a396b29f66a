// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perimeter, area, and shape queries over ordered 2D point sequences.
//!
//! Points are expected in sequential walk order (clockwise or
//! counter-clockwise). Degenerate inputs produce neutral results rather
//! than errors: callers must treat "not computed" as a valid outcome.

use nalgebra::Point2;

/// Minimum area for a polygon to count as non-degenerate (m²).
const MIN_VALID_AREA: f64 = 0.001;

/// Euclidean distance between two planar points, in meters.
#[inline]
pub fn distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (b - a).norm()
}

/// Perimeter of the path defined by ordered points.
///
/// When `closed` is true the wrap-around edge from the last point back to
/// the first is included. Fewer than 2 points yields 0.
pub fn perimeter(points: &[Point2<f64>], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let limit = if closed { points.len() } else { points.len() - 1 };
    let mut total = 0.0;
    for i in 0..limit {
        let current = &points[i];
        let next = &points[(i + 1) % points.len()];
        total += distance(current, next);
    }
    total
}

/// Area enclosed by the point sequence via the Shoelace formula, in m².
///
/// The sequence is treated as already closed: do not pass a duplicated
/// closing vertex. Returns the absolute magnitude regardless of winding
/// order; fewer than 3 points yields 0.
pub fn area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let current = &points[i];
        let next = &points[(i + 1) % points.len()];
        sum += current.x * next.y - next.x * current.y;
    }
    sum.abs() / 2.0
}

/// Whether the points form a usable polygon: at least 3 points that are not
/// collinear (area above [`MIN_VALID_AREA`]).
pub fn is_valid_polygon(points: &[Point2<f64>]) -> bool {
    points.len() >= 3 && area(points) > MIN_VALID_AREA
}

/// Arithmetic-mean centroid of the points; origin for empty input.
pub fn centroid(points: &[Point2<f64>]) -> Point2<f64> {
    if points.is_empty() {
        return Point2::origin();
    }

    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(sum_x / n, sum_y / n)
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }
}

/// Bounding box of the points; all-zero for empty input.
pub fn bounding_box(points: &[Point2<f64>]) -> BoundingBox {
    if points.is_empty() {
        return BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        };
    }

    let mut bounds = BoundingBox {
        min_x: f64::MAX,
        min_y: f64::MAX,
        max_x: f64::MIN,
        max_y: f64::MIN,
    };
    for p in points {
        bounds.min_x = bounds.min_x.min(p.x);
        bounds.min_y = bounds.min_y.min(p.y);
        bounds.max_x = bounds.max_x.max(p.x);
        bounds.max_y = bounds.max_y.max(p.y);
    }
    bounds
}
