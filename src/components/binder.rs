// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Two-way synchronization between text widgets and model attributes.
//!
//! A [`Binder`] keeps one editable text field and one typed attribute
//! consistent in both directions:
//!
//! * model → widget: every attribute change re-renders the value into
//!   display text;
//! * widget → model: when the user commits the field (focus loss or
//!   Enter, as decided by the shell, which then calls
//!   [`Binder::check_widget`]), the text is parsed and written to the
//!   attribute. Text that fails to parse — or a value the model's
//!   validator rejects — reverts the widget to the last good display
//!   text and leaves the model untouched.
//!
//! Feedback loops are broken twice over: the binder caches the last
//! known model value and skips the re-render its own write triggers, and
//! the document's no-op-on-equal rule keeps an unchanged round trip from
//! notifying at all.

use crate::geometry::Point2D;
use crate::model::{Document, NodeId, Value, View, ViewId};
use std::cell::RefCell;
use std::rc::Rc;

/// The editable text field contract the windowing shell provides.
pub trait TextWidget {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
}

/// Conversion between attribute values and display text.
pub trait ValueCodec {
    fn format(&self, value: &Value) -> String;
    /// Parse display text; the error is a human-readable reason.
    fn parse(&self, text: &str) -> Result<Value, String>;
}

/// Plain floating point with a fixed number of decimals.
#[derive(Debug, Clone, Copy)]
pub struct FloatCodec {
    pub precision: usize,
}

impl Default for FloatCodec {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl ValueCodec for FloatCodec {
    fn format(&self, value: &Value) -> String {
        match value.as_number() {
            Some(v) => format!("{v:.prec$}", prec = self.precision),
            None => String::new(),
        }
    }

    fn parse(&self, text: &str) -> Result<Value, String> {
        text.trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| format!("not a number: {text:?}"))
    }
}

/// Angle in degrees, rendered with a degree sign. The sign is optional
/// on input.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleCodec;

impl ValueCodec for AngleCodec {
    fn format(&self, value: &Value) -> String {
        match value.as_number() {
            Some(v) => format!("{v:.1}\u{00b0}"),
            None => String::new(),
        }
    }

    fn parse(&self, text: &str) -> Result<Value, String> {
        text.trim()
            .trim_end_matches('\u{00b0}')
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| format!("not an angle: {text:?}"))
    }
}

struct BinderCore<W> {
    widget: W,
    /// Last display text written or accepted by the binder.
    widget_state: String,
    /// Last model value the binder saw.
    model_state: Value,
}

/// Model subscription half of a binder; re-renders foreign changes.
struct BinderObserver<W> {
    core: Rc<RefCell<BinderCore<W>>>,
    codec: Rc<dyn ValueCodec>,
    attr: &'static str,
}

impl<W: TextWidget + 'static> View for BinderObserver<W> {
    fn attribute_changed(&mut self, doc: &mut Document, node: NodeId, name: &str, _old: &Value) {
        if name != self.attr {
            return;
        }
        let value = doc.get(node, name).cloned().unwrap_or_default();
        let mut core = self.core.borrow_mut();
        if core.model_state == value {
            // Our own write coming back; the widget already shows it.
            return;
        }
        let text = self.codec.format(&value);
        core.widget.set_text(&text);
        core.widget_state = text;
        core.model_state = value;
    }
}

/// Keeps a single text widget and a single typed attribute consistent.
pub struct Binder<W: TextWidget + 'static> {
    core: Rc<RefCell<BinderCore<W>>>,
    codec: Rc<dyn ValueCodec>,
    node: NodeId,
    attr: &'static str,
    view: ViewId,
}

impl<W: TextWidget + 'static> Binder<W> {
    pub fn new(
        doc: &mut Document,
        node: NodeId,
        attr: &'static str,
        widget: W,
        codec: impl ValueCodec + 'static,
    ) -> Self {
        let codec: Rc<dyn ValueCodec> = Rc::new(codec);
        let core = Rc::new(RefCell::new(BinderCore {
            widget,
            widget_state: String::new(),
            model_state: Value::None,
        }));
        let view = doc.add_view(
            node,
            Box::new(BinderObserver {
                core: core.clone(),
                codec: codec.clone(),
                attr,
            }),
        );
        let binder = Self {
            core,
            codec,
            node,
            attr,
            view,
        };
        binder.update_widget(doc);
        binder
    }

    /// Detach the model subscription (widget going away).
    pub fn detach(&self, doc: &mut Document) {
        doc.remove_view(self.view);
    }

    /// Access the owned widget, e.g. to feed it user input.
    pub fn with_widget<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.core.borrow_mut().widget)
    }

    /// The user committed the field: parse and write to the model, or
    /// revert the widget on any failure.
    pub fn check_widget(&self, doc: &mut Document) {
        let text = self.core.borrow().widget.text();
        if text == self.core.borrow().widget_state {
            return;
        }
        match self.codec.parse(&text) {
            Ok(value) => {
                {
                    let mut core = self.core.borrow_mut();
                    core.model_state = value.clone();
                    core.widget_state = text;
                }
                if let Err(err) = doc.set(self.node, self.attr, value) {
                    tracing::debug!("rejected by the model: {err}");
                    self.update_widget(doc);
                }
            }
            Err(reason) => {
                tracing::debug!("invalid input for `{}`: {reason}", self.attr);
                self.update_widget(doc);
            }
        }
    }

    /// Render the model's current value into the widget.
    fn update_widget(&self, doc: &Document) {
        let value = doc.get(self.node, self.attr).cloned().unwrap_or_default();
        let text = self.codec.format(&value);
        let mut core = self.core.borrow_mut();
        core.widget.set_text(&text);
        core.widget_state = text;
        core.model_state = value;
    }
}

struct VectorCore<W> {
    x_widget: W,
    y_widget: W,
    widget_state: (String, String),
    model_state: Value,
}

struct VectorObserver<W> {
    core: Rc<RefCell<VectorCore<W>>>,
    codec: FloatCodec,
    attr: &'static str,
}

impl<W: TextWidget + 'static> View for VectorObserver<W> {
    fn attribute_changed(&mut self, doc: &mut Document, node: NodeId, name: &str, _old: &Value) {
        if name != self.attr {
            return;
        }
        let value = doc.get(node, name).cloned().unwrap_or_default();
        let mut core = self.core.borrow_mut();
        if core.model_state == value {
            return;
        }
        let (tx, ty) = VectorBinder::<W>::render(&self.codec, &value);
        core.x_widget.set_text(&tx);
        core.y_widget.set_text(&ty);
        core.widget_state = (tx, ty);
        core.model_state = value;
    }
}

/// Binds two text widgets to one two-component point attribute. Both
/// sub-fields must parse before anything is committed; a failure in
/// either reverts both.
pub struct VectorBinder<W: TextWidget + 'static> {
    core: Rc<RefCell<VectorCore<W>>>,
    codec: FloatCodec,
    node: NodeId,
    attr: &'static str,
    view: ViewId,
}

impl<W: TextWidget + 'static> VectorBinder<W> {
    pub fn new(
        doc: &mut Document,
        node: NodeId,
        attr: &'static str,
        x_widget: W,
        y_widget: W,
    ) -> Self {
        let codec = FloatCodec::default();
        let core = Rc::new(RefCell::new(VectorCore {
            x_widget,
            y_widget,
            widget_state: (String::new(), String::new()),
            model_state: Value::None,
        }));
        let view = doc.add_view(
            node,
            Box::new(VectorObserver {
                core: core.clone(),
                codec,
                attr,
            }),
        );
        let binder = Self {
            core,
            codec,
            node,
            attr,
            view,
        };
        binder.update_widgets(doc);
        binder
    }

    pub fn detach(&self, doc: &mut Document) {
        doc.remove_view(self.view);
    }

    pub fn with_widgets<R>(&self, f: impl FnOnce(&mut W, &mut W) -> R) -> R {
        let mut core = self.core.borrow_mut();
        let VectorCore {
            x_widget, y_widget, ..
        } = &mut *core;
        f(x_widget, y_widget)
    }

    fn render(codec: &FloatCodec, value: &Value) -> (String, String) {
        match value.as_point() {
            Some(p) => (
                codec.format(&Value::Number(p.x)),
                codec.format(&Value::Number(p.y)),
            ),
            None => (String::new(), String::new()),
        }
    }

    /// Commit both sub-fields atomically.
    pub fn check_widgets(&self, doc: &mut Document) {
        let (tx, ty) = {
            let core = self.core.borrow();
            (core.x_widget.text(), core.y_widget.text())
        };
        if (tx.clone(), ty.clone()) == self.core.borrow().widget_state {
            return;
        }
        let parsed = self
            .codec
            .parse(&tx)
            .and_then(|x| self.codec.parse(&ty).map(|y| (x, y)));
        match parsed {
            Ok((Value::Number(x), Value::Number(y))) => {
                let value = Value::Point(Point2D::new(x, y));
                {
                    let mut core = self.core.borrow_mut();
                    core.model_state = value.clone();
                    core.widget_state = (tx, ty);
                }
                if let Err(err) = doc.set(self.node, self.attr, value) {
                    tracing::debug!("rejected by the model: {err}");
                    self.update_widgets(doc);
                }
            }
            _ => {
                tracing::debug!("invalid vector input for `{}`", self.attr);
                self.update_widgets(doc);
            }
        }
    }

    fn update_widgets(&self, doc: &Document) {
        let value = doc.get(self.node, self.attr).cloned().unwrap_or_default();
        let (tx, ty) = Self::render(&self.codec, &value);
        let mut core = self.core.borrow_mut();
        core.x_widget.set_text(&tx);
        core.y_widget.set_text(&ty);
        core.widget_state = (tx, ty);
        core.model_state = value;
    }
}
