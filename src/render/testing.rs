// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! A recording surface for unit tests.

use super::raster::Raster;
use super::surface::{Color, PathEl, Stroke, Surface};
use crate::geometry::{AffineTransform, Point2D};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Ellipse {
        center: Point2D,
        rx: f64,
        ry: f64,
        stroke: Stroke,
        fill: Option<Color>,
    },
    Polyline {
        points: Vec<Point2D>,
        stroke: Stroke,
    },
    Path {
        path: Vec<PathEl>,
        stroke: Stroke,
    },
    Blit {
        width: u32,
        height: u32,
        transform: AffineTransform,
    },
}

/// Surface that records every call for inspection.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn blits(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Blit { .. }))
    }
}

impl Surface for RecordingSurface {
    fn fill_ellipse(
        &mut self,
        center: Point2D,
        rx: f64,
        ry: f64,
        stroke: Stroke,
        fill: Option<Color>,
    ) {
        self.calls.push(DrawCall::Ellipse {
            center,
            rx,
            ry,
            stroke,
            fill,
        });
    }

    fn polyline(&mut self, points: &[Point2D], stroke: Stroke) {
        self.calls.push(DrawCall::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn stroke_path(&mut self, path: &[PathEl], stroke: Stroke) {
        self.calls.push(DrawCall::Path {
            path: path.to_vec(),
            stroke,
        });
    }

    fn blit(&mut self, raster: &Raster, transform: &AffineTransform) {
        self.calls.push(DrawCall::Blit {
            width: raster.width(),
            height: raster.height(),
            transform: *transform,
        });
    }
}
