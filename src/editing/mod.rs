// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Interactive editing: input events, view transforms and the canvas
//! controller.

pub mod canvas;
pub mod mouse;
pub mod viewport;

pub use canvas::{Canvas, Damage, Handle};
pub use mouse::{Cursor, Key, Modifiers, MouseButton, MouseEvent};
pub use viewport::{ViewPort, profile_to_image};
