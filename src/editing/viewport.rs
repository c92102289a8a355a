// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Composed coordinate transforms between the three spaces.
//!
//! * **Image space**: pixel coordinates of the loaded photo, origin
//!   top-left.
//! * **Window space**: pixels of the visible viewport, origin top-left.
//! * **Profile space**: airfoil-local chord units, x from 0 (leading
//!   edge) to 1 (trailing edge), y positive toward the upper surface.
//!
//! Transforms are rebuilt from the current model attributes on every use
//! and never cached across attribute changes; recomputation is O(1)
//! matrix algebra and staleness bugs are worse than the arithmetic.
//!
//! Angle handling follows the crate-wide convention (see
//! [`crate::geometry::transform`]): positive angles rotate clockwise on
//! screen. `atan2` over image deltas yields a y-up angle, so it is
//! negated at this boundary.

use crate::geometry::{AffineTransform, Point2D};

/// Window and image extents needed to compose the view transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPort {
    pub window_size: Point2D,
    pub image_size: Point2D,
}

impl ViewPort {
    pub fn new(window_size: Point2D, image_size: Point2D) -> Self {
        Self {
            window_size,
            image_size,
        }
    }

    pub fn window_center(&self) -> Point2D {
        self.window_size.scale(0.5)
    }

    /// Rotation/centering/scale part of the view transform, without the
    /// final focus shift: `R(alpha) ∘ T(−image_center) ∘ S(zoom)`.
    ///
    /// Applied to a point that means: scale by the zoom first, then move
    /// the (scaled) image center to the origin, then rotate about it.
    pub fn base_transform(&self, alpha_degrees: f64, zoom: f64) -> AffineTransform {
        let image_center = self.image_size.scale(0.5);
        AffineTransform::rotation(alpha_degrees.to_radians())
            .translate(image_center.neg())
            .scale(zoom, zoom)
    }

    /// The image→window transform.
    ///
    /// Composes [`base_transform`](Self::base_transform) with the
    /// translation that pins the model's focus point (image coordinates)
    /// to the window center. This is the central invariant of the
    /// viewer: the focus stays centered regardless of zoom and rotation.
    pub fn image_to_window(
        &self,
        alpha_degrees: f64,
        zoom: f64,
        focus: Point2D,
    ) -> AffineTransform {
        let base = self.base_transform(alpha_degrees, zoom);
        let shift = self.window_center().sub(base.apply(focus));
        AffineTransform::translation(shift).compose(&base)
    }
}

/// The profile→image transform for a chord from `p1` to `p2`.
///
/// Maps the canonical unit chord (0,0)–(1,0) onto the user-placed
/// endpoints: `T(p1) ∘ R(chord_angle) ∘ S(L, −L)` with `L = |p2 − p1|`.
/// The y-scale is negated because profile "up" (positive camber) must
/// render as image "up", which is negative y on screen. The chord angle
/// comes from `atan2` in the y-up sense and is negated per the rotation
/// convention.
///
/// A degenerate chord (`p1 == p2`) produces a valid but singular
/// transform; anything needing its inverse must treat
/// [`SingularTransform`](crate::geometry::SingularTransform) as "no
/// mapping this frame".
pub fn profile_to_image(p1: Point2D, p2: Point2D) -> AffineTransform {
    let chord = p2.sub(p1);
    let length = chord.length();
    let angle = -f64::atan2(p1.y - p2.y, p2.x - p1.x);
    AffineTransform::translation(p1)
        .rotate(angle)
        .scale(length, -length)
}
