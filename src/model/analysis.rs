// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! The analysis document: the concrete attribute set of one matching
//! session, built on top of the generic document node.
//!
//! All mutation goes through the typed setters here (which delegate to
//! [`Document::set`]) so that change notification always fires; nothing
//! writes backing state directly.

use super::node::{Document, InvalidValue, NodeId, Value};
use crate::foil::AirfoilData;
use crate::geometry::Point2D;
use crate::settings;
use std::sync::Arc;

/// Attribute names of the analysis model. The persisted document uses
/// these with a leading underscore as its JSON keys.
pub mod attrs {
    /// Rotation of the image, in degrees. Positive rotates the image
    /// clockwise on screen.
    pub const ALPHA: &str = "alpha";
    /// Magnification factor, strictly positive.
    pub const ZOOM: &str = "zoom";
    /// Image-space point kept at the window center.
    pub const FOCUS: &str = "focus";
    /// Chord endpoints in image coordinates.
    pub const P1: &str = "p1";
    pub const P2: &str = "p2";
    /// Camber handle offsets as fractions of the chord length, ≥ 0.01.
    pub const UPPER: &str = "upper";
    pub const LOWER: &str = "lower";
    /// The reference profile overlaid on the photo, if any.
    pub const AIRFOIL: &str = "airfoil";
    /// Raw encoded bytes of the loaded photo, if any.
    pub const BMP: &str = "bmp";
    /// Horizontal flip of the photo.
    pub const MIRROR: &str = "mirror";
    /// Brighten/darken factor in [0, 1]; 0.5 leaves the photo untouched.
    pub const HUE: &str = "hue";
    /// Vertical stretch applied to the overlaid profile.
    pub const YFACTOR: &str = "yfactor";
    /// Pixel offsets from documents written by old versions. Persisted
    /// for round-tripping, no longer consulted by the viewport (the
    /// focus point replaced them).
    pub const XSHIFT: &str = "xshift";
    pub const YSHIFT: &str = "yshift";
}

pub const DEFAULT_ALPHA: f64 = 0.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
pub const DEFAULT_FOCUS: Point2D = Point2D { x: 50.0, y: 50.0 };
pub const DEFAULT_P1: Point2D = Point2D { x: 0.0, y: 50.0 };
pub const DEFAULT_P2: Point2D = Point2D { x: 100.0, y: 50.0 };
pub const DEFAULT_UPPER: f64 = 0.05;
pub const DEFAULT_LOWER: f64 = 0.05;
pub const DEFAULT_HUE: f64 = 0.5;
pub const DEFAULT_YFACTOR: f64 = 1.0;

fn positive_number(v: &Value) -> Result<Value, String> {
    match v.as_number() {
        Some(n) if n > 0.0 => Ok(v.clone()),
        Some(_) => Err("must be positive".into()),
        None => Err("expected a number".into()),
    }
}

fn unit_interval(v: &Value) -> Result<Value, String> {
    match v.as_number() {
        Some(n) if (0.0..=1.0).contains(&n) => Ok(v.clone()),
        Some(_) => Err("must lie in 0..=1".into()),
        None => Err("expected a number".into()),
    }
}

/// Camber of exactly zero is unsupported; values below the minimum are
/// pulled up to it rather than rejected.
fn camber(v: &Value) -> Result<Value, String> {
    match v.as_number() {
        Some(n) => Ok(Value::Number(n.max(settings::editor::MIN_CAMBER))),
        None => Err("expected a number".into()),
    }
}

/// Typed handle to the analysis document node.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisModel {
    node: NodeId,
}

impl AnalysisModel {
    /// Create a fresh model with default attribute values in `doc`.
    pub fn create(doc: &mut Document) -> Self {
        let node = doc.create_node();
        doc.register_attribute(node, attrs::ALPHA, Value::Number(DEFAULT_ALPHA));
        doc.register_attribute_with(node, attrs::ZOOM, Value::Number(DEFAULT_ZOOM), positive_number);
        doc.register_attribute(node, attrs::FOCUS, Value::Point(DEFAULT_FOCUS));
        doc.register_attribute(node, attrs::P1, Value::Point(DEFAULT_P1));
        doc.register_attribute(node, attrs::P2, Value::Point(DEFAULT_P2));
        doc.register_attribute_with(node, attrs::UPPER, Value::Number(DEFAULT_UPPER), camber);
        doc.register_attribute_with(node, attrs::LOWER, Value::Number(DEFAULT_LOWER), camber);
        doc.register_attribute(node, attrs::AIRFOIL, Value::None);
        doc.register_attribute(node, attrs::BMP, Value::None);
        doc.register_attribute(node, attrs::MIRROR, Value::Bool(false));
        doc.register_attribute_with(node, attrs::HUE, Value::Number(DEFAULT_HUE), unit_interval);
        doc.register_attribute(node, attrs::YFACTOR, Value::Number(DEFAULT_YFACTOR));
        doc.register_attribute(node, attrs::XSHIFT, Value::Number(0.0));
        doc.register_attribute(node, attrs::YSHIFT, Value::Number(0.0));
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    fn number(&self, doc: &Document, name: &str, default: f64) -> f64 {
        doc.get(self.node, name)
            .and_then(Value::as_number)
            .unwrap_or(default)
    }

    fn point(&self, doc: &Document, name: &str, default: Point2D) -> Point2D {
        doc.get(self.node, name)
            .and_then(Value::as_point)
            .unwrap_or(default)
    }

    pub fn alpha(&self, doc: &Document) -> f64 {
        self.number(doc, attrs::ALPHA, DEFAULT_ALPHA)
    }

    pub fn set_alpha(&self, doc: &mut Document, v: f64) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::ALPHA, Value::Number(v))
    }

    pub fn zoom(&self, doc: &Document) -> f64 {
        self.number(doc, attrs::ZOOM, DEFAULT_ZOOM)
    }

    pub fn set_zoom(&self, doc: &mut Document, v: f64) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::ZOOM, Value::Number(v))
    }

    pub fn focus(&self, doc: &Document) -> Point2D {
        self.point(doc, attrs::FOCUS, DEFAULT_FOCUS)
    }

    pub fn set_focus(&self, doc: &mut Document, p: Point2D) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::FOCUS, Value::Point(p))
    }

    pub fn p1(&self, doc: &Document) -> Point2D {
        self.point(doc, attrs::P1, DEFAULT_P1)
    }

    pub fn set_p1(&self, doc: &mut Document, p: Point2D) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::P1, Value::Point(p))
    }

    pub fn p2(&self, doc: &Document) -> Point2D {
        self.point(doc, attrs::P2, DEFAULT_P2)
    }

    pub fn set_p2(&self, doc: &mut Document, p: Point2D) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::P2, Value::Point(p))
    }

    pub fn upper(&self, doc: &Document) -> f64 {
        self.number(doc, attrs::UPPER, DEFAULT_UPPER)
    }

    pub fn set_upper(&self, doc: &mut Document, v: f64) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::UPPER, Value::Number(v))
    }

    pub fn lower(&self, doc: &Document) -> f64 {
        self.number(doc, attrs::LOWER, DEFAULT_LOWER)
    }

    pub fn set_lower(&self, doc: &mut Document, v: f64) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::LOWER, Value::Number(v))
    }

    pub fn airfoil(&self, doc: &Document) -> Option<Arc<AirfoilData>> {
        match doc.get(self.node, attrs::AIRFOIL) {
            Some(Value::Foil(foil)) => Some(foil.clone()),
            _ => None,
        }
    }

    pub fn set_airfoil(
        &self,
        doc: &mut Document,
        foil: Option<Arc<AirfoilData>>,
    ) -> Result<(), InvalidValue> {
        let value = match foil {
            Some(foil) => Value::Foil(foil),
            None => Value::None,
        };
        doc.set(self.node, attrs::AIRFOIL, value)
    }

    pub fn bmp(&self, doc: &Document) -> Option<Arc<Vec<u8>>> {
        match doc.get(self.node, attrs::BMP) {
            Some(Value::Bytes(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    pub fn set_bmp(
        &self,
        doc: &mut Document,
        bytes: Option<Arc<Vec<u8>>>,
    ) -> Result<(), InvalidValue> {
        let value = match bytes {
            Some(bytes) => Value::Bytes(bytes),
            None => Value::None,
        };
        doc.set(self.node, attrs::BMP, value)
    }

    pub fn mirror(&self, doc: &Document) -> bool {
        doc.get(self.node, attrs::MIRROR)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_mirror(&self, doc: &mut Document, v: bool) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::MIRROR, Value::Bool(v))
    }

    pub fn hue(&self, doc: &Document) -> f64 {
        self.number(doc, attrs::HUE, DEFAULT_HUE)
    }

    pub fn set_hue(&self, doc: &mut Document, v: f64) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::HUE, Value::Number(v))
    }

    pub fn yfactor(&self, doc: &Document) -> f64 {
        self.number(doc, attrs::YFACTOR, DEFAULT_YFACTOR)
    }

    pub fn set_yfactor(&self, doc: &mut Document, v: f64) -> Result<(), InvalidValue> {
        doc.set(self.node, attrs::YFACTOR, Value::Number(v))
    }

    /// Chord length `|p2 − p1|`. Zero when the chord is degenerate.
    pub fn chord_length(&self, doc: &Document) -> f64 {
        self.p2(doc).sub(self.p1(doc)).length()
    }
}
