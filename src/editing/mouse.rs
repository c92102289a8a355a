// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Input event types delivered by the windowing shell.
//!
//! The shell owns the event loop; it translates its native events into
//! these types and feeds them to the [`Canvas`](super::Canvas). Pointer
//! positions are window coordinates (origin at the top-left of the
//! visible area).

use crate::geometry::Point2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier key state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A pointer event in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub pos: Point2D,
    pub button: Option<MouseButton>,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(pos: Point2D, button: Option<MouseButton>) -> Self {
        Self {
            pos,
            button,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(
        pos: Point2D,
        button: Option<MouseButton>,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            pos,
            button,
            modifiers,
        }
    }
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
}

/// Cursor icon the shell should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
}
