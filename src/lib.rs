// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Foilmatch: match a photographed wing section against a library of
//! airfoil profiles.
//!
//! The crate is the engine behind the interactive viewer: the 2D
//! transform algebra, the observable document model, the canvas
//! controller with its drag gestures, and the `.dat` profile library.
//! The windowing toolkit is a collaborator, reached only through the
//! traits in [`render::surface`], [`components::binder`] and the event
//! types in [`editing::mouse`]. The bundled binary is a headless front
//! that ranks a profile library against a saved analysis document.

pub mod components;
pub mod editing;
pub mod foil;
pub mod geometry;
pub mod model;
pub mod render;
pub mod settings;
pub mod theme;

use anyhow::Context;
use std::path::Path;

/// Entry point of the headless matcher: load the analysis document at
/// `document`, rank every `.dat` profile in `library` against its camber
/// handles and print the best matches.
pub fn run(document: &Path, library: &Path) -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("foilmatch=info".parse().unwrap()),
        )
        .init();

    let mut doc = model::Document::new();
    let analysis = model::read_model(&mut doc, document)
        .with_context(|| format!("loading {}", document.display()))?;

    let upper = analysis.upper(&doc);
    let lower = analysis.lower(&doc);
    tracing::info!("measured camber: upper {upper:.3}, lower {lower:.3}");

    let ranked = foil::rank_library(library, upper, lower)
        .with_context(|| format!("scanning {}", library.display()))?;
    if ranked.is_empty() {
        anyhow::bail!("no usable profiles in {}", library.display());
    }

    for (rank, result) in ranked.iter().take(10).enumerate() {
        println!(
            "{:>2}. {:<32} {:.6}  ({})",
            rank + 1,
            result.name.lines().next().unwrap_or(""),
            result.score,
            result.path.display()
        );
    }
    Ok(())
}
