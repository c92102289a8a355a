// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Saving and loading analysis documents.
//!
//! The on-disk format is a fixed magic header followed by a JSON object
//! whose keys are the attribute names with a leading underscore. All
//! values are JSON-native; the image bytes are stored as a latin-1 string
//! (one byte per codepoint) so arbitrary binary round-trips through JSON
//! unchanged.
//!
//! A failed load never touches an existing document: the model node is
//! populated only from a fully parsed body, in a caller-provided session.

use super::analysis::{AnalysisModel, attrs};
use super::node::Document;
use crate::foil::AirfoilData;
use crate::geometry::Point2D;
use serde_json::{Map, Value as Json, json};
use std::path::Path;
use std::sync::Arc;

/// Header identifying an analysis document. Unchanged since the first
/// release so old documents keep loading.
pub const MAGIC: &str = "profile_analyzer_0.0";

#[derive(Debug, thiserror::Error)]
pub enum DocumentFormatError {
    #[error("not an analysis document (missing `{}` header)", MAGIC)]
    MissingMagic,
    #[error("malformed document body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("attribute `{0}` has an unexpected value")]
    BadAttribute(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn encode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn decode_latin1(s: &str) -> Option<Vec<u8>> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}

fn point_to_json(p: Point2D) -> Json {
    json!([p.x, p.y])
}

/// Serialize the model to the document text (header plus JSON body).
pub fn save_model(doc: &Document, model: &AnalysisModel) -> String {
    let mut map = Map::new();
    map.insert("_alpha".into(), json!(model.alpha(doc)));
    map.insert("_zoom".into(), json!(model.zoom(doc)));
    map.insert("_focus".into(), point_to_json(model.focus(doc)));
    map.insert("_p1".into(), point_to_json(model.p1(doc)));
    map.insert("_p2".into(), point_to_json(model.p2(doc)));
    map.insert("_upper".into(), json!(model.upper(doc)));
    map.insert("_lower".into(), json!(model.lower(doc)));
    map.insert("_mirror".into(), json!(model.mirror(doc)));
    map.insert("_hue".into(), json!(model.hue(doc)));
    map.insert("_yfactor".into(), json!(model.yfactor(doc)));
    map.insert(
        "_xshift".into(),
        json!(doc.get(model.node(), attrs::XSHIFT).and_then(|v| v.as_number()).unwrap_or(0.0)),
    );
    map.insert(
        "_yshift".into(),
        json!(doc.get(model.node(), attrs::YSHIFT).and_then(|v| v.as_number()).unwrap_or(0.0)),
    );
    map.insert(
        "_bmp".into(),
        match model.bmp(doc) {
            Some(bytes) => Json::String(encode_latin1(&bytes)),
            None => Json::Null,
        },
    );
    map.insert(
        "_airfoil".into(),
        match model.airfoil(doc) {
            Some(foil) => json!([foil.name.clone(), [foil.xs.clone(), foil.ys.clone()]]),
            None => Json::Null,
        },
    );

    let body = serde_json::to_string_pretty(&Json::Object(map))
        .expect("analysis attributes are always representable as JSON");
    format!("{MAGIC}{body}")
}

/// Write the document to a file.
pub fn write_model(
    doc: &Document,
    model: &AnalysisModel,
    path: &Path,
) -> Result<(), DocumentFormatError> {
    std::fs::write(path, save_model(doc, model))?;
    tracing::info!("saved analysis to {}", path.display());
    Ok(())
}

fn get_number(map: &Map<String, Json>, key: &str) -> Result<Option<f64>, DocumentFormatError> {
    match map.get(key) {
        None | Some(Json::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| DocumentFormatError::BadAttribute(key.to_string())),
    }
}

fn get_point(map: &Map<String, Json>, key: &str) -> Result<Option<Point2D>, DocumentFormatError> {
    let bad = || DocumentFormatError::BadAttribute(key.to_string());
    match map.get(key) {
        None | Some(Json::Null) => Ok(None),
        Some(Json::Array(items)) if items.len() == 2 => {
            let x = items[0].as_f64().ok_or_else(bad)?;
            let y = items[1].as_f64().ok_or_else(bad)?;
            Ok(Some(Point2D::new(x, y)))
        }
        Some(_) => Err(bad()),
    }
}

fn get_floats(value: &Json, key: &str) -> Result<Vec<f64>, DocumentFormatError> {
    value
        .as_array()
        .ok_or_else(|| DocumentFormatError::BadAttribute(key.to_string()))?
        .iter()
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| DocumentFormatError::BadAttribute(key.to_string()))
        })
        .collect()
}

/// Parse document text and build a freshly created model in `doc`.
///
/// Attributes absent from the body keep their defaults, so documents
/// written by older versions load cleanly.
pub fn load_model(
    doc: &mut Document,
    text: &str,
) -> Result<AnalysisModel, DocumentFormatError> {
    let body = text
        .strip_prefix(MAGIC)
        .ok_or(DocumentFormatError::MissingMagic)?;
    let parsed: Json = serde_json::from_str(body)?;
    let map = parsed
        .as_object()
        .ok_or_else(|| DocumentFormatError::BadAttribute("document body".into()))?;

    // Extract and validate everything before the model exists, so a
    // malformed body leaves the session untouched.
    let alpha = get_number(map, "_alpha")?;
    let zoom = get_number(map, "_zoom")?;
    let focus = get_point(map, "_focus")?;
    let p1 = get_point(map, "_p1")?;
    let p2 = get_point(map, "_p2")?;
    let upper = get_number(map, "_upper")?;
    let lower = get_number(map, "_lower")?;
    let hue = get_number(map, "_hue")?;
    let yfactor = get_number(map, "_yfactor")?;
    let xshift = get_number(map, "_xshift")?;
    let yshift = get_number(map, "_yshift")?;
    let mirror = match map.get("_mirror") {
        None | Some(Json::Null) => None,
        Some(Json::Bool(b)) => Some(*b),
        Some(_) => return Err(DocumentFormatError::BadAttribute("_mirror".into())),
    };
    let bmp = match map.get("_bmp") {
        None | Some(Json::Null) => None,
        Some(Json::String(s)) => Some(
            decode_latin1(s)
                .ok_or_else(|| DocumentFormatError::BadAttribute("_bmp".into()))?,
        ),
        Some(_) => return Err(DocumentFormatError::BadAttribute("_bmp".into())),
    };
    let airfoil = match map.get("_airfoil") {
        None | Some(Json::Null) => None,
        Some(Json::Array(items)) if items.len() == 2 => {
            let bad = || DocumentFormatError::BadAttribute("_airfoil".into());
            let name = items[0].as_str().ok_or_else(bad)?.to_string();
            let coords = items[1].as_array().ok_or_else(bad)?;
            if coords.len() != 2 {
                return Err(bad());
            }
            let xs = get_floats(&coords[0], "_airfoil")?;
            let ys = get_floats(&coords[1], "_airfoil")?;
            Some(AirfoilData { name, xs, ys })
        }
        Some(_) => return Err(DocumentFormatError::BadAttribute("_airfoil".into())),
    };

    let model = AnalysisModel::create(doc);
    let node = model.node();
    let bad = |e: super::node::InvalidValue| DocumentFormatError::BadAttribute(e.attribute);
    if let Some(v) = alpha {
        model.set_alpha(doc, v).map_err(bad)?;
    }
    if let Some(v) = zoom {
        model.set_zoom(doc, v).map_err(bad)?;
    }
    if let Some(p) = focus {
        model.set_focus(doc, p).map_err(bad)?;
    }
    if let Some(p) = p1 {
        model.set_p1(doc, p).map_err(bad)?;
    }
    if let Some(p) = p2 {
        model.set_p2(doc, p).map_err(bad)?;
    }
    if let Some(v) = upper {
        model.set_upper(doc, v).map_err(bad)?;
    }
    if let Some(v) = lower {
        model.set_lower(doc, v).map_err(bad)?;
    }
    if let Some(v) = hue {
        model.set_hue(doc, v).map_err(bad)?;
    }
    if let Some(v) = yfactor {
        model.set_yfactor(doc, v).map_err(bad)?;
    }
    if let Some(v) = xshift {
        doc.set(node, attrs::XSHIFT, super::node::Value::Number(v))
            .map_err(bad)?;
    }
    if let Some(v) = yshift {
        doc.set(node, attrs::YSHIFT, super::node::Value::Number(v))
            .map_err(bad)?;
    }
    if let Some(v) = mirror {
        model.set_mirror(doc, v).map_err(bad)?;
    }
    if let Some(bytes) = bmp {
        model.set_bmp(doc, Some(Arc::new(bytes))).map_err(bad)?;
    }
    if let Some(foil) = airfoil {
        model.set_airfoil(doc, Some(Arc::new(foil))).map_err(bad)?;
    }
    Ok(model)
}

/// Read a document from a file.
pub fn read_model(
    doc: &mut Document,
    path: &Path,
) -> Result<AnalysisModel, DocumentFormatError> {
    let text = std::fs::read_to_string(path)?;
    let model = load_model(doc, &text)?;
    tracing::info!("loaded analysis from {}", path.display());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trip_preserves_every_attribute() {
        let mut doc = Document::new();
        let model = AnalysisModel::create(&mut doc);
        model.set_alpha(&mut doc, -12.5).unwrap();
        model.set_zoom(&mut doc, 2.25).unwrap();
        model.set_focus(&mut doc, Point2D::new(320.0, 200.0)).unwrap();
        model.set_p1(&mut doc, Point2D::new(14.0, 230.0)).unwrap();
        model.set_p2(&mut doc, Point2D::new(601.5, 228.0)).unwrap();
        model.set_upper(&mut doc, 0.07).unwrap();
        model.set_lower(&mut doc, 0.03).unwrap();
        model.set_mirror(&mut doc, true).unwrap();
        model.set_hue(&mut doc, 0.8).unwrap();
        model.set_yfactor(&mut doc, 1.2).unwrap();
        model
            .set_airfoil(
                &mut doc,
                Some(Arc::new(AirfoilData {
                    name: "AG03".into(),
                    xs: vec![1.0, 0.5, 0.0],
                    ys: vec![0.0, 0.05, 0.0],
                })),
            )
            .unwrap();

        let text = save_model(&doc, &model);
        assert!(text.starts_with(MAGIC));

        let mut doc2 = Document::new();
        let loaded = load_model(&mut doc2, &text).unwrap();
        assert_relative_eq!(loaded.alpha(&doc2), -12.5);
        assert_relative_eq!(loaded.zoom(&doc2), 2.25);
        assert_eq!(loaded.focus(&doc2), Point2D::new(320.0, 200.0));
        assert_eq!(loaded.p1(&doc2), Point2D::new(14.0, 230.0));
        assert_eq!(loaded.p2(&doc2), Point2D::new(601.5, 228.0));
        assert_relative_eq!(loaded.upper(&doc2), 0.07);
        assert_relative_eq!(loaded.lower(&doc2), 0.03);
        assert!(loaded.mirror(&doc2));
        assert_relative_eq!(loaded.hue(&doc2), 0.8);
        assert_relative_eq!(loaded.yfactor(&doc2), 1.2);
        let foil = loaded.airfoil(&doc2).unwrap();
        assert_eq!(foil.name, "AG03");
        assert_eq!(foil.xs, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn image_bytes_round_trip_bit_identical() {
        let mut doc = Document::new();
        let model = AnalysisModel::create(&mut doc);
        // Every possible byte value, including NUL and the non-ASCII
        // range that latin-1 encoding exists for.
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
        model
            .set_bmp(&mut doc, Some(Arc::new(bytes.clone())))
            .unwrap();

        let text = save_model(&doc, &model);
        let mut doc2 = Document::new();
        let loaded = load_model(&mut doc2, &text).unwrap();
        assert_eq!(*loaded.bmp(&doc2).unwrap(), bytes);
    }

    #[test]
    fn missing_magic_is_a_format_error() {
        let mut doc = Document::new();
        assert!(matches!(
            load_model(&mut doc, "{}"),
            Err(DocumentFormatError::MissingMagic)
        ));
    }

    #[test]
    fn malformed_body_is_a_format_error() {
        let mut doc = Document::new();
        let text = format!("{MAGIC}{{not json");
        assert!(matches!(
            load_model(&mut doc, &text),
            Err(DocumentFormatError::Json(_))
        ));
    }

    #[test]
    fn absent_attributes_keep_their_defaults() {
        let mut doc = Document::new();
        let text = format!("{MAGIC}{{}}");
        let model = load_model(&mut doc, &text).unwrap();
        assert_relative_eq!(model.zoom(&doc), 1.0);
        assert!(model.bmp(&doc).is_none());
        assert!(model.airfoil(&doc).is_none());
    }

    #[test]
    fn wrongly_typed_attribute_is_a_format_error() {
        let mut doc = Document::new();
        let text = format!("{MAGIC}{{\"_zoom\": \"big\"}}");
        assert!(matches!(
            load_model(&mut doc, &text),
            Err(DocumentFormatError::BadAttribute(attr)) if attr == "_zoom"
        ));
    }
}
