// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! 2D affine transforms.
//!
//! A transform is a 2×2 linear map plus a translation,
//! `T(p) = M·p + v`, stored as six coefficients. Transforms are
//! immutable; every operation returns a new value.
//!
//! # Conventions
//!
//! These two conventions are the most error-prone contracts in the whole
//! crate and every angle-valued API is documented against them:
//!
//! * **Composition order**: `a.compose(b)` applies `b` to the point
//!   *first*, then `a` — the usual mathematical `A∘B`. The builder
//!   methods (`translate`, `rotate`, `scale`) compose the elementary
//!   transform on the right, so in a chain like
//!   `AffineTransform::identity().translate(t).rotate(r)` the rotation is
//!   applied to the point before the translation.
//! * **Rotation sign**: a positive angle rotates *clockwise on screen*
//!   (origin top-left, y growing downward). That is the matrix
//!   `[cos −sin; sin cos]`, which in a y-up mathematical frame would read
//!   as counter-clockwise. Any angle arriving from a y-up frame (such as
//!   `atan2` over image deltas) must be negated at the boundary.

use super::Point2D;

/// Inverting a transform whose determinant is zero.
///
/// Reachable from ordinary user input: a zero-length chord (`p1 == p2`)
/// or a zoom of zero both produce a singular map. Callers that need an
/// inverse treat this as "no valid mapping this frame" and skip the
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("transform is singular (determinant is zero)")]
pub struct SingularTransform;

/// `T(p) = (m11·x + m12·y + v1, m21·x + m22·y + v2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub v1: f64,
    pub v2: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        v1: 0.0,
        v2: 0.0,
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translation(v: Point2D) -> Self {
        AffineTransform {
            v1: v.x,
            v2: v.y,
            ..Self::IDENTITY
        }
    }

    /// Rotation about the origin. Positive angle (radians) is clockwise
    /// on screen.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        AffineTransform {
            m11: c,
            m12: -s,
            m21: s,
            m22: c,
            v1: 0.0,
            v2: 0.0,
        }
    }

    /// Rotation about an arbitrary center, `T(c) ∘ R(angle) ∘ T(−c)`.
    pub fn rotation_about(angle: f64, center: Point2D) -> Self {
        Self::translation(center)
            .compose(&Self::rotation(angle))
            .compose(&Self::translation(center.neg()))
    }

    pub fn scaling(fx: f64, fy: f64) -> Self {
        AffineTransform {
            m11: fx,
            m22: fy,
            ..Self::IDENTITY
        }
    }

    /// Uniform scale by `z` that keeps `p` fixed.
    pub fn zoom_about(z: f64, p: Point2D) -> Self {
        AffineTransform {
            m11: z,
            m12: 0.0,
            m21: 0.0,
            m22: z,
            v1: p.x * (1.0 - z),
            v2: p.y * (1.0 - z),
        }
    }

    /// `self ∘ other`: the returned transform applies `other` first,
    /// then `self`, so `a.compose(b).apply(p) == a.apply(b.apply(p))`.
    pub fn compose(&self, other: &AffineTransform) -> AffineTransform {
        AffineTransform {
            m11: self.m11 * other.m11 + self.m12 * other.m21,
            m12: self.m11 * other.m12 + self.m12 * other.m22,
            m21: self.m21 * other.m11 + self.m22 * other.m21,
            m22: self.m21 * other.m12 + self.m22 * other.m22,
            v1: self.m11 * other.v1 + self.m12 * other.v2 + self.v1,
            v2: self.m21 * other.v1 + self.m22 * other.v2 + self.v2,
        }
    }

    /// `self` with a translation applied to the point before it.
    pub fn translate(&self, v: Point2D) -> AffineTransform {
        self.compose(&Self::translation(v))
    }

    /// `self` with a rotation applied to the point before it. Positive
    /// angle (radians) is clockwise on screen.
    pub fn rotate(&self, angle: f64) -> AffineTransform {
        self.compose(&Self::rotation(angle))
    }

    /// `self` with a scale applied to the point before it.
    pub fn scale(&self, fx: f64, fy: f64) -> AffineTransform {
        self.compose(&Self::scaling(fx, fy))
    }

    pub fn determinant(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Closed-form inverse of the 2×2 block plus translation.
    pub fn invert(&self) -> Result<AffineTransform, SingularTransform> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON {
            return Err(SingularTransform);
        }
        let inv_det = 1.0 / det;
        let m11 = self.m22 * inv_det;
        let m12 = -self.m12 * inv_det;
        let m21 = -self.m21 * inv_det;
        let m22 = self.m11 * inv_det;
        Ok(AffineTransform {
            m11,
            m12,
            m21,
            m22,
            v1: -(m11 * self.v1 + m12 * self.v2),
            v2: -(m21 * self.v1 + m22 * self.v2),
        })
    }

    pub fn apply(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.m11 * p.x + self.m12 * p.y + self.v1,
            self.m21 * p.x + self.m22 * p.y + self.v2,
        )
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn assert_points_eq(a: Point2D, b: Point2D) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-8);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-8);
    }

    #[test]
    fn identity_is_neutral_for_composition() {
        let t = AffineTransform::identity()
            .translate(Point2D::new(3.0, -7.0))
            .rotate(0.4)
            .scale(2.0, 0.5);
        let left = AffineTransform::IDENTITY.compose(&t);
        let right = t.compose(&AffineTransform::IDENTITY);
        assert_eq!(left, t);
        assert_eq!(right, t);
    }

    #[test]
    fn compose_applies_right_operand_first() {
        let a = AffineTransform::translation(Point2D::new(10.0, 0.0));
        let b = AffineTransform::scaling(2.0, 2.0);
        let p = Point2D::new(1.0, 1.0);
        // (a∘b)(p) must equal a(b(p)), not b(a(p)).
        assert_points_eq(a.compose(&b).apply(p), a.apply(b.apply(p)));
        assert_points_eq(a.compose(&b).apply(p), Point2D::new(12.0, 2.0));
        assert_points_eq(b.compose(&a).apply(p), Point2D::new(22.0, 2.0));
    }

    #[test]
    fn positive_rotation_is_clockwise_on_screen() {
        // With y growing downward, rotating the +x axis a quarter turn
        // clockwise lands on the +y axis ("down" on screen).
        let r = AffineTransform::rotation(std::f64::consts::FRAC_PI_2);
        assert_points_eq(r.apply(Point2D::new(1.0, 0.0)), Point2D::new(0.0, 1.0));

        // 45°: down-right on screen.
        let r = AffineTransform::rotation(std::f64::consts::FRAC_PI_4);
        let p = r.apply(Point2D::new(1.0, 0.0));
        assert_relative_eq!(p.x, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(p.y, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn rotation_about_center_keeps_center_fixed() {
        let c = Point2D::new(50.0, 20.0);
        let r = AffineTransform::rotation_about(1.2, c);
        assert_points_eq(r.apply(c), c);
        // A point one unit right of the center stays one unit away.
        let p = r.apply(Point2D::new(51.0, 20.0));
        assert_relative_eq!(p.distance(c), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zoom_about_keeps_focus_fixed() {
        let p = Point2D::new(30.0, 40.0);
        let z = AffineTransform::zoom_about(2.5, p);
        assert_points_eq(z.apply(p), p);
        // Distances from the focus scale by the zoom factor.
        let q = Point2D::new(32.0, 40.0);
        assert_relative_eq!(z.apply(q).distance(p), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn invert_round_trips_composed_chain() {
        let t = AffineTransform::identity()
            .translate(Point2D::new(12.0, -3.5))
            .rotate(0.7)
            .scale(1.8, 0.6)
            .rotate(-0.2)
            .translate(Point2D::new(-4.0, 9.0));
        let inv = t.invert().unwrap();
        for p in [
            Point2D::ZERO,
            Point2D::new(1.0, 0.0),
            Point2D::new(-17.0, 23.0),
            Point2D::new(0.001, -1000.0),
        ] {
            assert_points_eq(inv.apply(t.apply(p)), p);
            assert_points_eq(t.apply(inv.apply(p)), p);
        }
    }

    #[test]
    fn invert_fails_on_singular_transform() {
        // Zero scale: the map collapses the plane onto a line.
        let t = AffineTransform::scaling(0.0, 1.0);
        assert_eq!(t.invert(), Err(SingularTransform));
        // Zero uniform scale, as produced by a zero-length chord.
        let t = AffineTransform::identity().rotate(0.3).scale(0.0, 0.0);
        assert_eq!(t.invert(), Err(SingularTransform));
    }

    #[test]
    fn composition_is_associative() {
        let a = AffineTransform::rotation(0.3);
        let b = AffineTransform::translation(Point2D::new(5.0, 6.0));
        let c = AffineTransform::scaling(2.0, 3.0);
        let p = Point2D::new(-2.0, 7.0);
        assert_points_eq(
            a.compose(&b.compose(&c)).apply(p),
            a.compose(&b).compose(&c).apply(p),
        );
    }
}
