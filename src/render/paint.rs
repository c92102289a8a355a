// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing helpers for the canvas scene.
//!
//! All positions arrive in window coordinates; handle sizes are fixed in
//! window pixels so they stay the same size at every zoom level.

use super::surface::{PathEl, Stroke, Surface};
use crate::foil::AirfoilData;
use crate::geometry::{AffineTransform, Point2D};
use crate::theme;

fn handle_stroke(transient: bool) -> Stroke {
    let color = if transient {
        theme::handle::TRANSIENT_STROKE
    } else {
        theme::handle::STROKE
    };
    Stroke::new(color, theme::size::LINE_WIDTH)
}

/// A chord endpoint handle: circle with a small cross at the center.
pub fn draw_edge_handle(surface: &mut dyn Surface, p: Point2D, transient: bool) {
    let stroke = handle_stroke(transient);
    let fill = if transient {
        theme::handle::TRANSIENT_FILL
    } else {
        theme::handle::FILL
    };
    let r = theme::handle::RADIUS;
    surface.fill_ellipse(p, r, r, stroke, Some(fill));
    let e = theme::handle::ARM;
    surface.polyline(
        &[p.sub(Point2D::new(e, 0.0)), p.add(Point2D::new(e, 0.0))],
        stroke,
    );
    surface.polyline(
        &[p.sub(Point2D::new(0.0, e)), p.add(Point2D::new(0.0, e))],
        stroke,
    );
}

/// A camber handle: a small X.
pub fn draw_sub_handle(surface: &mut dyn Surface, p: Point2D, transient: bool) {
    let stroke = handle_stroke(transient);
    let e = theme::handle::ARM;
    surface.polyline(
        &[p.add(Point2D::new(-e, -e)), p.add(Point2D::new(e, e))],
        stroke,
    );
    surface.polyline(
        &[p.add(Point2D::new(-e, e)), p.add(Point2D::new(e, -e))],
        stroke,
    );
}

/// The reference profile as a stroked path through every sample point,
/// with the profile's y stretched by `yfactor` before the transform.
pub fn draw_profile(
    surface: &mut dyn Surface,
    profile_to_window: &AffineTransform,
    foil: &AirfoilData,
    yfactor: f64,
) {
    let mut path = Vec::with_capacity(foil.len());
    for (&x, &y) in foil.xs.iter().zip(&foil.ys) {
        let p = profile_to_window.apply(Point2D::new(x, y * yfactor));
        if path.is_empty() {
            path.push(PathEl::MoveTo(p));
        } else {
            path.push(PathEl::LineTo(p));
        }
    }
    if path.is_empty() {
        return;
    }
    surface.stroke_path(
        &path,
        Stroke::new(theme::profile::STROKE, theme::size::LINE_WIDTH),
    );
}
