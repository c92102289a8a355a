// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across theme
//! changes. Visual styling (colors, sizes) belongs in `theme.rs`.

use serde::Deserialize;
use std::path::Path;

// ============================================================================
// EDITOR SETTINGS
// ============================================================================
/// Minimum zoom level (2% of original size)
const MIN_ZOOM: f64 = 0.02;

/// Maximum zoom level (50x original size)
const MAX_ZOOM: f64 = 50.0;

/// Multiplicative zoom change per wheel notch
const ZOOM_STEP: f64 = 1.5;

/// Hit radius around a handle, in window pixels regardless of zoom
const HANDLE_HIT_RADIUS: f64 = 14.0;

/// Smallest representable camber offset (a camber of exactly zero is
/// unsupported)
const MIN_CAMBER: f64 = 0.01;

/// Chord station (fraction of the chord) where the camber handles sit
/// and where library profiles are sampled for matching
const CAMBER_STATION: f64 = 0.5;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Editor settings (zoom, hit testing, camber)
pub mod editor {
    /// Minimum zoom level (2% of original size)
    pub const MIN_ZOOM: f64 = super::MIN_ZOOM;

    /// Maximum zoom level (50x original size)
    pub const MAX_ZOOM: f64 = super::MAX_ZOOM;

    /// Multiplicative zoom change per wheel notch
    pub const ZOOM_STEP: f64 = super::ZOOM_STEP;

    /// Hit radius around a handle, in window pixels regardless of zoom
    pub const HANDLE_HIT_RADIUS: f64 = super::HANDLE_HIT_RADIUS;

    /// Smallest representable camber offset
    pub const MIN_CAMBER: f64 = super::MIN_CAMBER;

    /// Chord station of the camber handles
    pub const CAMBER_STATION: f64 = super::CAMBER_STATION;
}

/// User-overridable subset of the editor settings, loaded from an
/// optional TOML file. Absent keys keep the built-in constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    pub handle_hit_radius: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            handle_hit_radius: HANDLE_HIT_RADIUS,
        }
    }
}

impl Settings {
    /// Parse a settings file. A missing file yields the defaults; a
    /// present but malformed file is an error so typos do not silently
    /// vanish.
    pub fn load(path: &Path) -> anyhow::Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let text = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&text)?;
        tracing::info!("loaded settings from {}", path.display());
        Ok(settings)
    }
}
