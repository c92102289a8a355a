// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! The canvas controller.
//!
//! Connects pointer input, the analysis model and the drawing surface:
//! it hit-tests the four interactive handles through the current view
//! transform, runs the per-gesture drag state machine, and repaints the
//! scene. All stored positions are image coordinates; window coordinates
//! exist only transiently while an event or a repaint is processed.
//!
//! The controller is split from its model subscription: [`Canvas`] is
//! owned by the windowing shell and driven by input events, while a small
//! internal observer object lives in the [`Document`] and forwards
//! attribute changes into shared damage state. Neither object is both a
//! widget and a view.
//!
//! During a drag the provisional handle position (the *transient*) is
//! kept out of the model so the notification fan-out stays quiet until
//! the gesture commits on button release.

use super::mouse::{Cursor, Key, MouseEvent};
use super::viewport::{ViewPort, profile_to_image};
use crate::geometry::{AffineTransform, Point2D, Rect};
use crate::model::analysis::attrs;
use crate::model::{AnalysisModel, Document, NodeId, Value, View, ViewId};
use crate::render::paint;
use crate::render::raster::Raster;
use crate::render::surface::Surface;
use crate::settings::Settings;
use std::cell::RefCell;
use std::rc::Rc;

/// The interactive handles, identified in hit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    P1,
    P2,
    Upper,
    Lower,
}

impl Handle {
    pub fn is_camber(self) -> bool {
        matches!(self, Handle::Upper | Handle::Lower)
    }
}

/// Region of the window that needs repainting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Damage {
    All,
    Region(Rect),
}

impl Damage {
    fn merge(self, other: Damage) -> Damage {
        match (self, other) {
            (Damage::Region(a), Damage::Region(b)) => Damage::Region(a.union(&b)),
            _ => Damage::All,
        }
    }
}

/// State written by the model observer and read by the canvas.
#[derive(Default)]
struct SharedState {
    damage: Option<Damage>,
    raster_stale: bool,
}

impl SharedState {
    fn add_damage(&mut self, damage: Damage) {
        self.damage = Some(match self.damage {
            Some(existing) => existing.merge(damage),
            None => damage,
        });
    }
}

/// The model subscription half of the canvas; see the module docs.
struct CanvasObserver {
    shared: Rc<RefCell<SharedState>>,
}

impl View for CanvasObserver {
    fn attribute_changed(&mut self, _doc: &mut Document, _node: NodeId, name: &str, _old: &Value) {
        let mut shared = self.shared.borrow_mut();
        match name {
            attrs::BMP | attrs::HUE | attrs::MIRROR => {
                shared.raster_stale = true;
                shared.add_damage(Damage::All);
            }
            attrs::ALPHA
            | attrs::ZOOM
            | attrs::FOCUS
            | attrs::P1
            | attrs::P2
            | attrs::UPPER
            | attrs::LOWER
            | attrs::AIRFOIL
            | attrs::YFACTOR => {
                shared.add_damage(Damage::All);
            }
            _ => {}
        }
    }
}

/// Canvas controller: hit testing, drag gestures and painting.
pub struct Canvas {
    model: AnalysisModel,
    settings: Settings,
    shared: Rc<RefCell<SharedState>>,
    observer: ViewId,
    window_size: Point2D,
    /// Decoded, mirrored and tinted photo; rebuilt when the observer
    /// flags it stale.
    raster: Option<Raster>,
    decode_attempted: bool,
    /// Handle under the pointer (hover state).
    current: Option<Handle>,
    /// Pointer position at button-down, in image coordinates.
    drag_start: Option<Point2D>,
    /// Handle position at button-down, in image coordinates.
    drag_origin: Option<Point2D>,
    /// Provisional handle position during a drag, in image coordinates.
    transient: Option<Point2D>,
}

impl Canvas {
    pub fn new(
        doc: &mut Document,
        model: AnalysisModel,
        settings: Settings,
        window_size: Point2D,
    ) -> Self {
        let shared = Rc::new(RefCell::new(SharedState {
            damage: Some(Damage::All),
            raster_stale: false,
        }));
        let observer = doc.add_view(
            model.node(),
            Box::new(CanvasObserver {
                shared: shared.clone(),
            }),
        );
        Self {
            model,
            settings,
            shared,
            observer,
            window_size,
            raster: None,
            decode_attempted: false,
            current: None,
            drag_start: None,
            drag_origin: None,
            transient: None,
        }
    }

    /// Detach the model subscription when the window closes.
    pub fn detach(&mut self, doc: &mut Document) {
        doc.remove_view(self.observer);
    }

    pub fn model(&self) -> AnalysisModel {
        self.model
    }

    /// Damage accumulated since the last call, if any.
    pub fn take_damage(&mut self) -> Option<Damage> {
        self.shared.borrow_mut().damage.take()
    }

    /// Cursor icon for the current hover state.
    pub fn cursor(&self) -> Cursor {
        if self.current.is_some() {
            Cursor::Crosshair
        } else {
            Cursor::Default
        }
    }

    pub fn window_resized(&mut self, size: Point2D) {
        self.window_size = size;
        self.shared.borrow_mut().add_damage(Damage::All);
    }

    /// The transient handle position, if a drag is in flight.
    pub fn transient(&self) -> Option<Point2D> {
        self.transient
    }

    // ========================================================================
    // VIEW TRANSFORMS
    // ========================================================================

    fn image_size(&self) -> Point2D {
        match &self.raster {
            Some(raster) => Point2D::new(f64::from(raster.width()), f64::from(raster.height())),
            // Matches the empty-document behavior of the viewer: a
            // nominal 100x100 canvas.
            None => Point2D::new(100.0, 100.0),
        }
    }

    fn viewport(&self) -> ViewPort {
        ViewPort::new(self.window_size, self.image_size())
    }

    fn image_to_window(&self, doc: &Document) -> AffineTransform {
        self.viewport().image_to_window(
            self.model.alpha(doc),
            self.model.zoom(doc),
            self.model.focus(doc),
        )
    }

    // ========================================================================
    // HANDLES
    // ========================================================================

    /// Unit vector perpendicular to the chord, pointing "up" on screen
    /// when the chord runs left to right. `None` for a degenerate chord.
    fn chord_perpendicular(&self, doc: &Document) -> Option<Point2D> {
        self.model
            .p2(doc)
            .sub(self.model.p1(doc))
            .normalized()
            .map(Point2D::perpendicular)
    }

    /// Interactive handles and their image-space positions. The camber
    /// handles sit on the perpendicular through the chord midpoint,
    /// offset by the camber value times the chord length; they disappear
    /// while the chord is degenerate.
    pub fn handle_positions(&self, doc: &Document) -> Vec<(Handle, Point2D)> {
        let p1 = self.model.p1(doc);
        let p2 = self.model.p2(doc);
        let mut handles = vec![(Handle::P1, p1), (Handle::P2, p2)];
        if let Some(perp) = self.chord_perpendicular(doc) {
            let center = p1.midpoint(p2);
            let length = p2.sub(p1).length();
            handles.push((
                Handle::Upper,
                center.add(perp.scale(self.model.upper(doc) * length)),
            ));
            handles.push((
                Handle::Lower,
                center.sub(perp.scale(self.model.lower(doc) * length)),
            ));
        }
        handles
    }

    /// The closest handle within the hit radius of a window position.
    /// The radius is constant in window pixels, independent of zoom.
    fn hit_test(&self, doc: &Document, pos: Point2D) -> Option<Handle> {
        let to_window = self.image_to_window(doc);
        let mut best: Option<(Handle, f64)> = None;
        for (handle, image_pos) in self.handle_positions(doc) {
            let dist = to_window.apply(image_pos).distance(pos);
            if dist > self.settings.handle_hit_radius {
                continue;
            }
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((handle, dist));
            }
        }
        best.map(|(handle, _)| handle)
    }

    // ========================================================================
    // DRAG STATE MACHINE
    // ========================================================================

    /// Hover: track the handle under the pointer and the cursor icon.
    pub fn mouse_moved(&mut self, doc: &Document, event: &MouseEvent) {
        self.current = self.hit_test(doc, event.pos);
    }

    /// Enter the active drag state if a handle is under the pointer.
    pub fn mouse_down(&mut self, doc: &Document, event: &MouseEvent) {
        let Some(handle) = self.current else {
            return;
        };
        // The drag works through the inverse view transform; with a
        // singular transform there is no valid mapping this frame and
        // the gesture never starts.
        let Ok(inverse) = self.image_to_window(doc).invert() else {
            tracing::debug!("singular view transform, ignoring button press");
            return;
        };
        let origin = self
            .handle_positions(doc)
            .into_iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, pos)| pos);
        let Some(origin) = origin else {
            return;
        };
        self.drag_start = Some(inverse.apply(event.pos));
        self.drag_origin = Some(origin);
        self.set_transient(doc, Some(origin));
    }

    /// Update the transient position while dragging. Camber handles are
    /// constrained to the perpendicular through the chord midpoint; the
    /// component of the motion along the chord is discarded.
    pub fn mouse_dragged(&mut self, doc: &Document, event: &MouseEvent) {
        let (Some(handle), Some(start), Some(origin)) =
            (self.current, self.drag_start, self.drag_origin)
        else {
            return;
        };
        let Ok(inverse) = self.image_to_window(doc).invert() else {
            return;
        };
        let pointer = inverse.apply(event.pos);
        let mut candidate = origin.add(pointer.sub(start));
        if handle.is_camber() {
            if let Some(perp) = self.chord_perpendicular(doc) {
                let center = self.model.p1(doc).midpoint(self.model.p2(doc));
                let offset = candidate.sub(center).dot(perp);
                candidate = center.add(perp.scale(offset));
            }
        }
        self.set_transient(doc, Some(candidate));
    }

    /// Commit: write the dragged position into the model and return to
    /// idle. Only this step touches the model, so the notification
    /// fan-out fires once per gesture rather than once per mouse move.
    pub fn mouse_up(&mut self, doc: &mut Document, _event: &MouseEvent) {
        if let (Some(handle), Some(transient)) = (self.current, self.transient) {
            let result = match handle {
                Handle::P1 => self.model.set_p1(doc, transient),
                Handle::P2 => self.model.set_p2(doc, transient),
                Handle::Upper | Handle::Lower => self.commit_camber(doc, handle, transient),
            };
            if let Err(err) = result {
                tracing::warn!("drag commit rejected: {err}");
            }
        }
        self.set_transient(doc, None);
        self.drag_start = None;
        self.drag_origin = None;
        self.current = None;
    }

    /// Escape cancels an in-flight drag without committing.
    pub fn key_down(&mut self, doc: &Document, key: Key) {
        match key {
            Key::Escape => {
                if self.drag_start.is_some() {
                    self.set_transient(doc, None);
                    self.drag_start = None;
                    self.drag_origin = None;
                    self.current = None;
                }
            }
        }
    }

    /// Camber commit: signed projection of the transient onto the
    /// chord perpendicular, as a fraction of the chord length. The
    /// model's setter clamps the result to the minimum camber.
    fn commit_camber(
        &self,
        doc: &mut Document,
        handle: Handle,
        transient: Point2D,
    ) -> Result<(), crate::model::InvalidValue> {
        let Some(perp) = self.chord_perpendicular(doc) else {
            return Ok(());
        };
        let center = self.model.p1(doc).midpoint(self.model.p2(doc));
        let length = self.model.chord_length(doc);
        let offset = transient.sub(center).dot(perp) / length;
        match handle {
            Handle::Upper => self.model.set_upper(doc, offset),
            Handle::Lower => self.model.set_lower(doc, -offset),
            _ => Ok(()),
        }
    }

    fn set_transient(&mut self, doc: &Document, transient: Option<Point2D>) {
        if self.transient == transient {
            return;
        }
        let to_window = self.image_to_window(doc);
        let mut shared = self.shared.borrow_mut();
        let diameter = 4.0 * self.settings.handle_hit_radius;
        for p in [self.transient, transient].into_iter().flatten() {
            shared.add_damage(Damage::Region(Rect::centered(
                to_window.apply(p),
                diameter,
                diameter,
            )));
        }
        drop(shared);
        self.transient = transient;
    }

    // ========================================================================
    // WHEEL ZOOM
    // ========================================================================

    /// Wheel zoom: one notch multiplies the zoom by the configured step,
    /// keeping the image point under the cursor exactly where it is on
    /// screen. The focus attribute is re-derived so the centering
    /// invariant and the cursor-pinning requirement agree.
    pub fn wheel(&mut self, doc: &mut Document, pos: Point2D, notches: f64) {
        if notches == 0.0 {
            return;
        }
        let old_zoom = self.model.zoom(doc);
        let factor = if notches > 0.0 {
            self.settings.zoom_step
        } else {
            1.0 / self.settings.zoom_step
        };
        let new_zoom = (old_zoom * factor).clamp(self.settings.min_zoom, self.settings.max_zoom);
        if new_zoom == old_zoom {
            return;
        }

        let Ok(inverse) = self.image_to_window(doc).invert() else {
            return;
        };
        // Image point currently under the cursor.
        let anchor = inverse.apply(pos);

        // Choose the focus so that `anchor` projects back onto `pos`
        // under the new transform: with base B and window center c, the
        // view maps q ↦ B(q) + c − B(focus), so B(focus) must equal
        // B(anchor) + c − pos.
        let viewport = self.viewport();
        let base = viewport.base_transform(self.model.alpha(doc), new_zoom);
        let Ok(base_inverse) = base.invert() else {
            return;
        };
        let target = base
            .apply(anchor)
            .add(viewport.window_center())
            .sub(pos);
        let focus = base_inverse.apply(target);

        let result = self
            .model
            .set_zoom(doc, new_zoom)
            .and_then(|()| self.model.set_focus(doc, focus));
        if let Err(err) = result {
            tracing::warn!("wheel zoom rejected: {err}");
        }
    }

    // ========================================================================
    // PAINTING
    // ========================================================================

    /// Rebuild the pixel cache if the observer flagged it stale.
    fn ensure_raster(&mut self, doc: &Document) {
        if std::mem::take(&mut self.shared.borrow_mut().raster_stale) {
            self.raster = None;
            self.decode_attempted = false;
        }
        if self.raster.is_some() || self.decode_attempted {
            return;
        }
        self.decode_attempted = true;
        let Some(bytes) = self.model.bmp(doc) else {
            return;
        };
        match Raster::decode(&bytes) {
            Ok(mut raster) => {
                if self.model.mirror(doc) {
                    raster = raster.mirrored();
                }
                let hue = self.model.hue(doc);
                raster = raster.tinted(hue);
                tracing::debug!(
                    "decoded photo: {}x{}, hue {hue}",
                    raster.width(),
                    raster.height()
                );
                self.raster = Some(raster);
            }
            Err(err) => tracing::warn!("could not decode photo: {err}"),
        }
    }

    /// Repaint the whole scene onto `surface`.
    pub fn paint(&mut self, doc: &Document, surface: &mut dyn Surface) {
        self.ensure_raster(doc);
        let to_window = self.image_to_window(doc);

        if let Some(raster) = &self.raster {
            surface.blit(raster, &to_window);
        }

        // Chord handles.
        for p in [self.model.p1(doc), self.model.p2(doc)] {
            paint::draw_edge_handle(surface, to_window.apply(p), false);
        }

        // Profile overlay, stretched by yfactor.
        if let Some(foil) = self.model.airfoil(doc) {
            let profile_to_window = to_window.compose(&profile_to_image(
                self.model.p1(doc),
                self.model.p2(doc),
            ));
            paint::draw_profile(surface, &profile_to_window, &foil, self.model.yfactor(doc));
        }

        // Camber handles.
        for (handle, pos) in self.handle_positions(doc) {
            if handle.is_camber() {
                paint::draw_sub_handle(surface, to_window.apply(pos), false);
            }
        }

        // The transient is drawn last, in grey, in the style of the
        // handle being dragged.
        if let (Some(handle), Some(transient)) = (self.current, self.transient) {
            let pos = to_window.apply(transient);
            if handle.is_camber() {
                paint::draw_sub_handle(surface, pos, true);
            } else {
                paint::draw_edge_handle(surface, pos, true);
            }
        }
    }
}
