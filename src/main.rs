// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Headless matcher: rank a profile library against a saved analysis.

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: foilmatch <analysis.wfd> <profile-directory>");
        std::process::exit(2);
    }
    foilmatch::run(&PathBuf::from(&args[1]), &PathBuf::from(&args[2]))
}
