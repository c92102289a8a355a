// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Ranking a directory of `.dat` profiles against the measured camber.
//!
//! The measured shape is the pair of camber handle offsets from the
//! analysis model (fractions of the chord, positive magnitudes above and
//! below the chord line). Each library profile is sampled at the same
//! chord station and scored by squared deviation; unreadable or malformed
//! files are logged and skipped, never fatal.

use super::AirfoilData;
use super::parse::load_dat;
use crate::settings;
use std::path::{Path, PathBuf};

/// One ranked library entry. Lower scores are better matches.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub name: String,
    pub path: PathBuf,
    pub score: f64,
}

/// Squared deviation of the profile's surfaces at the camber station
/// from the measured offsets, or `None` when the profile does not cover
/// the station.
///
/// `upper` and `lower` are positive magnitudes; the lower surface is
/// compared against `-lower`.
pub fn score_profile(foil: &AirfoilData, upper: f64, lower: f64) -> Option<f64> {
    let found = foil.crossings_at(settings::editor::CAMBER_STATION);
    let upper_y = found.iter().copied().fold(f64::NAN, f64::max);
    let lower_y = found.iter().copied().fold(f64::NAN, f64::min);
    if upper_y.is_nan() {
        return None;
    }
    let du = upper_y - upper;
    let dl = lower_y + lower;
    Some(du * du + dl * dl)
}

/// Scan `dir` for `.dat` files and rank them by [`score_profile`],
/// best match first.
pub fn rank_library(
    dir: &Path,
    upper: f64,
    lower: f64,
) -> Result<Vec<MatchResult>, std::io::Error> {
    let mut results = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_dat = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dat"));
        if !is_dat {
            continue;
        }
        let (foil, warnings) = match load_dat(&path) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("skipping {}: {err}", path.display());
                continue;
            }
        };
        for warning in &warnings {
            tracing::warn!(
                "{}:{}: unparsable line {:?}",
                path.display(),
                warning.line,
                warning.content
            );
        }
        let Some(score) = score_profile(&foil, upper, lower) else {
            tracing::warn!(
                "skipping {}: no surface at the camber station",
                path.display()
            );
            continue;
        };
        results.push(MatchResult {
            name: foil.name.clone(),
            path,
            score,
        });
    }
    results.sort_by(|a, b| a.score.total_cmp(&b.score));
    tracing::info!("ranked {} profiles from {}", results.len(), dir.display());
    Ok(results)
}
