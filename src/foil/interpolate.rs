// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Crossings of a profile perimeter with a vertical line.

/// Linear interpolation of the y values where the polyline through
/// `(xs[i], ys[i])` crosses `x = t`.
///
/// The sequence is a perimeter walk, not a function graph: x values rise
/// and fall, so the line may be crossed several times. For an interior
/// station of a closed profile this yields two values (upper and lower
/// surface); a station that only touches the profile's x-extent yields
/// one; a `t` outside the sampled range yields none, which is a defined
/// empty result rather than an error.
///
/// Crossings from adjacent segments that land on the same y (a sample
/// lying exactly on the line) are collapsed into one.
pub fn crossings(xs: &[f64], ys: &[f64], t: f64) -> Vec<f64> {
    let n = xs.len().min(ys.len());
    let mut found: Vec<f64> = Vec::new();
    for i in 1..n {
        let (x0, x1) = (xs[i - 1], xs[i]);
        if !(x0 <= t && t <= x1) && !(x1 <= t && t <= x0) {
            continue;
        }
        let (y0, y1) = (ys[i - 1], ys[i]);
        let y = if x0 == x1 {
            // Vertical segment sitting on the line; both endpoints cross.
            push_unique(&mut found, y0);
            y1
        } else {
            y0 + (t - x0) * (y1 - y0) / (x1 - x0)
        };
        push_unique(&mut found, y);
    }
    found
}

fn push_unique(found: &mut Vec<f64>, y: f64) {
    const EPS: f64 = 1e-9;
    if !found.iter().any(|known| (known - y).abs() < EPS) {
        found.push(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Diamond-shaped perimeter: trailing edge → upper → leading edge →
    /// lower → trailing edge, x-range exactly [0, 1].
    fn diamond() -> (Vec<f64>, Vec<f64>) {
        (
            vec![1.0, 0.5, 0.0, 0.5, 1.0],
            vec![0.0, 0.1, 0.0, -0.06, 0.0],
        )
    }

    #[test]
    fn interior_station_yields_upper_and_lower_surface() {
        let (xs, ys) = diamond();
        let mut found = crossings(&xs, &ys, 0.25);
        found.sort_by(f64::total_cmp);
        assert_eq!(found.len(), 2);
        assert_relative_eq!(found[1], 0.05);
        assert_relative_eq!(found[0], -0.03);
    }

    #[test]
    fn sample_point_on_the_line_is_reported_once() {
        let (xs, ys) = diamond();
        // x = 0.5 hits the sample points of both surfaces exactly; each
        // belongs to two segments but must be collapsed.
        let mut found = crossings(&xs, &ys, 0.5);
        found.sort_by(f64::total_cmp);
        assert_eq!(found.len(), 2);
        assert_relative_eq!(found[1], 0.1);
        assert_relative_eq!(found[0], -0.06);
    }

    #[test]
    fn boundary_stations_return_endpoint_values() {
        let (xs, ys) = diamond();
        // The leading edge is touched once.
        let found = crossings(&xs, &ys, 0.0);
        assert_eq!(found.len(), 1);
        assert_relative_eq!(found[0], 0.0);
        // The trailing edge: both surfaces end at y = 0, collapsed.
        let found = crossings(&xs, &ys, 1.0);
        assert_eq!(found.len(), 1);
        assert_relative_eq!(found[0], 0.0);
    }

    #[test]
    fn boundary_station_with_distinct_endpoint_values() {
        // Open trailing edge: the surfaces end at different y values.
        let xs = vec![1.0, 0.0, 1.0];
        let ys = vec![0.01, 0.0, -0.01];
        let mut found = crossings(&xs, &ys, 1.0);
        found.sort_by(f64::total_cmp);
        assert_eq!(found.len(), 2);
        assert_relative_eq!(found[0], -0.01);
        assert_relative_eq!(found[1], 0.01);
    }

    #[test]
    fn station_outside_data_range_is_empty() {
        let (xs, ys) = diamond();
        assert!(crossings(&xs, &ys, 1.5).is_empty());
        assert!(crossings(&xs, &ys, -0.2).is_empty());
    }

    #[test]
    fn empty_and_single_point_data_yield_nothing() {
        assert!(crossings(&[], &[], 0.5).is_empty());
        assert!(crossings(&[0.5], &[0.1], 0.5).is_empty());
    }

    #[test]
    fn mismatched_lengths_use_common_prefix() {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![0.0, 1.0];
        let found = crossings(&xs, &ys, 0.5);
        assert_eq!(found.len(), 1);
        assert_relative_eq!(found[0], 0.5);
    }
}
