// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Rendering: the surface contract, decoded bitmaps and scene painting.

pub mod paint;
pub mod raster;
pub mod surface;

#[cfg(test)]
pub mod testing;

pub use raster::{Raster, RasterError};
pub use surface::{Color, PathEl, Stroke, Surface};
