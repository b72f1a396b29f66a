// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Walked-path utilities.

use nalgebra::Point2;

/// Smooth a path with a symmetric moving average.
///
/// Each output point is the mean of the input points inside a window of
/// `window` samples centered on it, clamped at both ends of the path.
/// Reduces tracking jitter without shifting the path's endpoints far.
/// Paths shorter than the window are returned unchanged.
pub fn smooth(points: &[Point2<f64>], window: usize) -> Vec<Point2<f64>> {
    if points.len() < window || window < 2 {
        return points.to_vec();
    }

    let half = window / 2;
    (0..points.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(points.len());
            let slice = &points[start..end];
            let n = slice.len() as f64;
            let (sx, sy) = slice
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            Point2::new(sx / n, sy / n)
        })
        .collect()
}
