// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Observable document nodes.
//!
//! A [`Document`] owns an arena of nodes, each exposing a set of named
//! attributes. Writing an attribute through [`Document::set`] compares
//! against the stored value, runs an optional validator, maintains the
//! owner back-reference index for nested nodes and then notifies every
//! subscribed [`View`] — synchronously and depth-first, so a view callback
//! that writes another attribute runs that cascade to completion before
//! the original `set` returns.
//!
//! The owner index is a back-reference only: it records *which* node holds
//! another node under *which* attribute name so that modifications can fan
//! out to the owner's views, but it never extends a node's lifetime. All
//! of this state is owned by the `Document` session context; there are no
//! process-wide tables.

use crate::foil::AirfoilData;
use crate::geometry::Point2D;
use std::collections::HashMap;
use std::sync::Arc;

/// A value rejected by an attribute's validator.
///
/// The binder layer turns this into "revert the widget to the last good
/// text"; the model is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for attribute `{attribute}`: {reason}")]
pub struct InvalidValue {
    pub attribute: String,
    pub reason: String,
}

/// Handle into a [`Document`]'s node arena.
///
/// Ids are never reused within a session, so a stale handle can index the
/// arena but never alias a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Handle to a view subscription, for later detaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewId(usize);

/// A typed attribute value.
///
/// `Node` embeds a reference to another document node and is what the
/// owner index tracks. Large payloads (`Bytes`, `Foil`) are behind `Arc`
/// so that reads and the equality check stay cheap.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Point(Point2D),
    Text(String),
    Bytes(Arc<Vec<u8>>),
    Foil(Arc<AirfoilData>),
    Node(NodeId),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point2D> {
        match self {
            Value::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Validator (the "custom setter" of an attribute). May coerce the value
/// before it is stored, or reject it with a reason.
pub type Validator = fn(&Value) -> Result<Value, String>;

/// Observer of one node's attribute changes.
///
/// Dispatch is capability-based: every callback has a default empty body,
/// so a view only reacts to what it cares about and the absence of a
/// handler is not an error. Callbacks receive the document mutably and may
/// write further attributes; those writes notify re-entrantly before the
/// callback's own trigger returns.
#[allow(unused_variables)]
pub trait View {
    /// Called once when the view is attached to `node`.
    fn model_added(&mut self, doc: &mut Document, node: NodeId) {}

    /// An attribute of the observed node changed. `old` is the previously
    /// stored value.
    fn attribute_changed(&mut self, doc: &mut Document, node: NodeId, name: &str, old: &Value) {}

    /// A node held by the observed node under attribute `name` was itself
    /// modified.
    fn attribute_modified(&mut self, doc: &mut Document, node: NodeId, name: &str, child: NodeId) {}
}

struct Attribute {
    value: Value,
    validator: Option<Validator>,
}

#[derive(Default)]
struct NodeState {
    attrs: HashMap<String, Attribute>,
}

struct ViewSlot {
    node: NodeId,
    /// `None` while the view is taken out for a callback, or after
    /// detaching.
    view: Option<Box<dyn View>>,
    detached: bool,
}

/// Session context owning all nodes, subscriptions and the owner index.
#[derive(Default)]
pub struct Document {
    nodes: Vec<NodeState>,
    views: Vec<ViewSlot>,
    /// child -> (owner, attribute name) back-references.
    owners: HashMap<NodeId, Vec<(NodeId, String)>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeState::default());
        id
    }

    /// Declare an attribute with a default value. No notification fires.
    pub fn register_attribute(&mut self, node: NodeId, name: &str, default: Value) {
        self.nodes[node.0].attrs.insert(
            name.to_string(),
            Attribute {
                value: default,
                validator: None,
            },
        );
    }

    /// Declare an attribute with a default value and a validator that
    /// every subsequent [`set`](Self::set) must pass.
    pub fn register_attribute_with(
        &mut self,
        node: NodeId,
        name: &str,
        default: Value,
        validator: Validator,
    ) {
        self.nodes[node.0].attrs.insert(
            name.to_string(),
            Attribute {
                value: default,
                validator: Some(validator),
            },
        );
    }

    /// Current value of an attribute, or `None` if it was never declared.
    pub fn get(&self, node: NodeId, name: &str) -> Option<&Value> {
        self.nodes[node.0].attrs.get(name).map(|a| &a.value)
    }

    /// Write an attribute.
    ///
    /// Setting the current value (by equality) is a no-op: nothing is
    /// stored and no notification fires. Otherwise the validator (if any)
    /// runs, owner edges are updated for node-valued attributes, the value
    /// is stored, and `attribute_changed` / `attribute_modified` fan out
    /// to the subscribed views.
    pub fn set(&mut self, node: NodeId, name: &str, value: Value) -> Result<(), InvalidValue> {
        let attr = self
            .nodes[node.0]
            .attrs
            .entry(name.to_string())
            .or_insert_with(|| Attribute {
                value: Value::None,
                validator: None,
            });

        if attr.value == value {
            return Ok(());
        }
        let value = match attr.validator {
            Some(validate) => validate(&value).map_err(|reason| InvalidValue {
                attribute: name.to_string(),
                reason,
            })?,
            None => value,
        };
        // The validator may have coerced the value back onto the stored
        // one; that is still a no-op from the observers' perspective.
        if attr.value == value {
            return Ok(());
        }

        let old = std::mem::replace(&mut attr.value, value.clone());

        if let Value::Node(child) = old {
            self.remove_owner(child, node, name);
        }
        if let Value::Node(child) = value {
            self.add_owner(child, node, name);
        }

        self.notify_attribute_changed(node, name, &old);
        Ok(())
    }

    /// All (owner, attribute name) pairs currently holding `node`.
    pub fn owner_attributes(&self, node: NodeId) -> Vec<(NodeId, String)> {
        self.owners.get(&node).cloned().unwrap_or_default()
    }

    /// Attach a view to a node. The view's `model_added` runs before any
    /// further notifications can reach it.
    pub fn add_view(&mut self, node: NodeId, mut view: Box<dyn View>) -> ViewId {
        let id = ViewId(self.views.len());
        self.views.push(ViewSlot {
            node,
            view: None,
            detached: false,
        });
        view.model_added(self, node);
        let slot = &mut self.views[id.0];
        if !slot.detached {
            slot.view = Some(view);
        }
        id
    }

    /// Detach a view. Returns the view unless it is currently executing a
    /// callback (in which case it is dropped when the callback returns).
    pub fn remove_view(&mut self, id: ViewId) -> Option<Box<dyn View>> {
        let slot = &mut self.views[id.0];
        slot.detached = true;
        slot.view.take()
    }

    fn add_owner(&mut self, child: NodeId, owner: NodeId, name: &str) {
        self.owners
            .entry(child)
            .or_default()
            .push((owner, name.to_string()));
    }

    fn remove_owner(&mut self, child: NodeId, owner: NodeId, name: &str) {
        if let Some(entries) = self.owners.get_mut(&child) {
            if let Some(pos) = entries
                .iter()
                .position(|(o, n)| *o == owner && n == name)
            {
                entries.remove(pos);
            }
            if entries.is_empty() {
                self.owners.remove(&child);
            }
        }
    }

    /// Indices of the live view slots observing `node`, captured before
    /// dispatch so that subscriptions added from inside a callback do not
    /// receive the notification that is already in flight.
    fn view_slots_of(&self, node: NodeId) -> Vec<usize> {
        self.views
            .iter()
            .enumerate()
            .filter(|(_, s)| s.node == node && !s.detached)
            .map(|(i, _)| i)
            .collect()
    }

    fn notify_attribute_changed(&mut self, node: NodeId, name: &str, old: &Value) {
        for i in self.view_slots_of(node) {
            // Take the view out of its slot for the duration of the
            // callback so it can receive `&mut Document` without
            // aliasing. A re-entrant notification for the same node
            // skips the empty slot.
            let Some(mut view) = self.views[i].view.take() else {
                continue;
            };
            view.attribute_changed(self, node, name, old);
            let slot = &mut self.views[i];
            if !slot.detached {
                slot.view = Some(view);
            }
        }
        self.notify_owners(node);
    }

    /// Fan a modification of `node` out to the views of every node that
    /// owns it, as `attribute_modified` under the owning attribute name.
    fn notify_owners(&mut self, node: NodeId) {
        for (owner, name) in self.owner_attributes(node) {
            for i in self.view_slots_of(owner) {
                let Some(mut view) = self.views[i].view.take() else {
                    continue;
                };
                view.attribute_modified(self, owner, &name, node);
                let slot = &mut self.views[i];
                if !slot.detached {
                    slot.view = Some(view);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every notification it receives.
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl View for Recorder {
        fn attribute_changed(
            &mut self,
            _doc: &mut Document,
            _node: NodeId,
            name: &str,
            old: &Value,
        ) {
            self.log
                .borrow_mut()
                .push(format!("{name}_changed old={old:?}"));
        }

        fn attribute_modified(
            &mut self,
            _doc: &mut Document,
            _node: NodeId,
            name: &str,
            _child: NodeId,
        ) {
            self.log.borrow_mut().push(format!("{name}_modified"));
        }
    }

    fn doc_with_recorder() -> (Document, NodeId, Rc<RefCell<Vec<String>>>) {
        let mut doc = Document::new();
        let node = doc.create_node();
        let log = Rc::new(RefCell::new(Vec::new()));
        doc.add_view(node, Box::new(Recorder { log: log.clone() }));
        (doc, node, log)
    }

    #[test]
    fn set_to_equal_value_is_a_noop() {
        let (mut doc, node, log) = doc_with_recorder();
        doc.register_attribute(node, "zoom", Value::Number(1.0));
        doc.set(node, "zoom", Value::Number(1.0)).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn set_to_new_value_notifies_once_with_old_value() {
        let (mut doc, node, log) = doc_with_recorder();
        doc.register_attribute(node, "zoom", Value::Number(1.0));
        doc.set(node, "zoom", Value::Number(2.5)).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            ["zoom_changed old=Number(1.0)"]
        );
        assert_eq!(doc.get(node, "zoom"), Some(&Value::Number(2.5)));
    }

    #[test]
    fn every_subscribed_view_is_notified() {
        let (mut doc, node, log) = doc_with_recorder();
        doc.add_view(node, Box::new(Recorder { log: log.clone() }));
        doc.register_attribute(node, "alpha", Value::Number(0.0));
        doc.set(node, "alpha", Value::Number(10.0)).unwrap();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn validator_rejects_without_storing_or_notifying() {
        fn positive(v: &Value) -> Result<Value, String> {
            match v.as_number() {
                Some(n) if n > 0.0 => Ok(v.clone()),
                _ => Err("must be positive".into()),
            }
        }
        let (mut doc, node, log) = doc_with_recorder();
        doc.register_attribute_with(node, "zoom", Value::Number(1.0), positive);
        let err = doc.set(node, "zoom", Value::Number(-3.0)).unwrap_err();
        assert_eq!(err.attribute, "zoom");
        assert_eq!(doc.get(node, "zoom"), Some(&Value::Number(1.0)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn validator_coercion_onto_stored_value_is_a_noop() {
        fn clamp_min(v: &Value) -> Result<Value, String> {
            match v.as_number() {
                Some(n) => Ok(Value::Number(n.max(0.01))),
                None => Err("expected a number".into()),
            }
        }
        let (mut doc, node, log) = doc_with_recorder();
        doc.register_attribute_with(node, "upper", Value::Number(0.01), clamp_min);
        doc.set(node, "upper", Value::Number(-5.0)).unwrap();
        assert_eq!(doc.get(node, "upper"), Some(&Value::Number(0.01)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn assigning_a_child_node_registers_an_owner_edge() {
        let (mut doc, parent, log) = doc_with_recorder();
        let child = doc.create_node();
        doc.register_attribute(parent, "child", Value::None);

        doc.set(parent, "child", Value::Node(child)).unwrap();
        assert_eq!(
            doc.owner_attributes(child),
            vec![(parent, "child".to_string())]
        );
        assert_eq!(
            log.borrow().as_slice(),
            ["child_changed old=None"]
        );

        // Clearing the attribute removes the back-reference and passes
        // the child as the old value.
        log.borrow_mut().clear();
        doc.set(parent, "child", Value::None).unwrap();
        assert!(doc.owner_attributes(child).is_empty());
        assert_eq!(
            log.borrow().as_slice(),
            [format!("child_changed old={:?}", Value::Node(child))]
        );
    }

    #[test]
    fn child_change_fans_out_to_owner_views() {
        let (mut doc, parent, log) = doc_with_recorder();
        let child = doc.create_node();
        doc.register_attribute(parent, "child", Value::None);
        doc.register_attribute(child, "a", Value::Number(0.0));
        doc.set(parent, "child", Value::Node(child)).unwrap();
        log.borrow_mut().clear();

        doc.set(child, "a", Value::Number(1.0)).unwrap();
        // The parent's view hears about the child's modification under
        // the owning attribute name.
        assert_eq!(log.borrow().as_slice(), ["child_modified"]);
    }

    #[test]
    fn a_node_may_have_multiple_owners_under_distinct_names() {
        let mut doc = Document::new();
        let a = doc.create_node();
        let b = doc.create_node();
        let child = doc.create_node();
        doc.register_attribute(a, "left", Value::None);
        doc.register_attribute(b, "right", Value::None);
        doc.set(a, "left", Value::Node(child)).unwrap();
        doc.set(b, "right", Value::Node(child)).unwrap();

        let mut owners = doc.owner_attributes(child);
        owners.sort();
        assert_eq!(
            owners,
            vec![(a, "left".to_string()), (b, "right".to_string())]
        );
    }

    /// A view that reacts to one attribute change by writing another.
    struct Cascader {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl View for Cascader {
        fn attribute_changed(
            &mut self,
            doc: &mut Document,
            node: NodeId,
            name: &str,
            _old: &Value,
        ) {
            self.log.borrow_mut().push(format!("{name}_changed"));
            if name == "a" {
                // Re-entrant write: must run its whole cascade before the
                // outer `set` returns.
                doc.set(node, "b", Value::Number(99.0)).unwrap();
            }
        }
    }

    #[test]
    fn reentrant_write_from_callback_completes_depth_first() {
        let mut doc = Document::new();
        let node = doc.create_node();
        let log = Rc::new(RefCell::new(Vec::new()));
        doc.add_view(node, Box::new(Cascader { log: log.clone() }));
        doc.add_view(node, Box::new(Recorder { log: log.clone() }));
        doc.register_attribute(node, "a", Value::Number(0.0));
        doc.register_attribute(node, "b", Value::Number(0.0));

        doc.set(node, "a", Value::Number(1.0)).unwrap();
        assert_eq!(doc.get(node, "b"), Some(&Value::Number(99.0)));
        // The cascader hears `a`, writes `b`; the recorder hears the
        // nested `b` before the outer `a` dispatch reaches it.
        assert_eq!(
            log.borrow().as_slice(),
            [
                "a_changed",
                "b_changed old=Number(0.0)",
                "a_changed old=Number(0.0)",
            ]
        );
    }

    #[test]
    fn detached_view_receives_nothing() {
        let (mut doc, node, log) = doc_with_recorder();
        doc.register_attribute(node, "zoom", Value::Number(1.0));
        let id = doc.add_view(node, Box::new(Recorder { log: log.clone() }));
        doc.remove_view(id);
        doc.set(node, "zoom", Value::Number(3.0)).unwrap();
        assert_eq!(log.borrow().len(), 1);
    }
}
