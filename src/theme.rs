// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use crate::render::surface::Color;

// ============================================================================
// CANVAS
// ============================================================================
const CANVAS_BACKGROUND: Color = Color::from_rgb8(0xff, 0xff, 0xff);

// ============================================================================
// HANDLES -- chord endpoints and camber handles
// ============================================================================
const HANDLE_STROKE: Color = Color::from_rgb8(0xff, 0x00, 0x00);
const HANDLE_FILL: Color = Color::from_rgba8(0xff, 0x00, 0x00, 0x32);

// A dragged handle is shown as a grey transient until it is committed.
const TRANSIENT_STROKE: Color = Color::from_rgb8(0x80, 0x80, 0x80);
const TRANSIENT_FILL: Color = Color::from_rgba8(0x80, 0x80, 0x80, 0x32);

// ============================================================================
// PROFILE OVERLAY
// ============================================================================
const PROFILE_STROKE: Color = Color::from_rgb8(0x00, 0x80, 0x00);

// ============================================================================
// SIZES
// ============================================================================
/// Drawn radius of a chord handle circle, in window pixels
const HANDLE_RADIUS: f64 = 14.0;

/// Half-length of the cross / X arms inside a handle, in window pixels
const HANDLE_ARM: f64 = 5.0;

/// Stroke width of handles and the profile overlay
const LINE_WIDTH: f64 = 2.0;

// ============================================================================
// PUBLIC API
// ============================================================================

pub mod canvas {
    use super::*;

    pub const BACKGROUND: Color = CANVAS_BACKGROUND;
}

pub mod handle {
    use super::*;

    pub const STROKE: Color = HANDLE_STROKE;
    pub const FILL: Color = HANDLE_FILL;
    pub const TRANSIENT_STROKE: Color = super::TRANSIENT_STROKE;
    pub const TRANSIENT_FILL: Color = super::TRANSIENT_FILL;
    pub const RADIUS: f64 = HANDLE_RADIUS;
    pub const ARM: f64 = HANDLE_ARM;
}

pub mod profile {
    use super::*;

    pub const STROKE: Color = PROFILE_STROKE;
}

pub mod size {
    pub const LINE_WIDTH: f64 = super::LINE_WIDTH;
}
