// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! The drawing surface contract.
//!
//! The windowing toolkit supplies the actual raster surface; the engine
//! only requires the small set of primitives below. Implementations are
//! expected to be double-buffered so a partial redraw never tears, but
//! that is a quality-of-service concern of the host, not of this trait.

use super::raster::Raster;
use crate::geometry::{AffineTransform, Point2D};

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Stroke appearance for lines and paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Element of a stroked path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEl {
    MoveTo(Point2D),
    LineTo(Point2D),
}

/// Draw calls the canvas issues per repaint. All coordinates are window
/// space; only [`blit`](Surface::blit) carries its own transform.
pub trait Surface {
    /// Ellipse centered on `center`, optionally filled.
    fn fill_ellipse(
        &mut self,
        center: Point2D,
        rx: f64,
        ry: f64,
        stroke: Stroke,
        fill: Option<Color>,
    );

    /// Open polyline through `points`.
    fn polyline(&mut self, points: &[Point2D], stroke: Stroke);

    /// Stroked path of move/line segments.
    fn stroke_path(&mut self, path: &[PathEl], stroke: Stroke);

    /// Draw `raster` with its pixel grid mapped through `transform`.
    fn blit(&mut self, raster: &Raster, transform: &AffineTransform);
}
