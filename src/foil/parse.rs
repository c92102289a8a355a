// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Loading airfoil `.dat` files.
//!
//! The format is line-oriented: leading non-blank lines that do not parse
//! as coordinates form the profile name, everything after is `x y` float
//! pairs separated by whitespace. Two point orderings are in circulation
//! and both are handled:
//!
//! * **Selig**: one perimeter walk starting at the trailing edge, over
//!   the upper surface to the leading edge and back along the lower
//!   surface.
//! * **Lednicer**: upper surface leading→trailing, then lower surface
//!   leading→trailing, announced by a first "pair" holding the two point
//!   counts (recognizable because counts exceed the chord-normalized
//!   range). Reordered here into a single perimeter walk.
//!
//! Lines that fail to parse as two floats are collected as warnings and
//! skipped, never fatal.

use super::AirfoilData;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FoilParseError {
    #[error("no coordinate data found")]
    NoCoordinates,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A skipped input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the input.
    pub line: usize,
    pub content: String,
}

fn parse_pair(line: &str) -> Option<(f64, f64)> {
    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

/// Parse `.dat` text into a profile plus the warnings for skipped lines.
pub fn parse_dat(text: &str) -> Result<(AirfoilData, Vec<ParseWarning>), FoilParseError> {
    let mut name_lines: Vec<&str> = Vec::new();
    let mut values: Vec<(f64, f64)> = Vec::new();
    let mut warnings = Vec::new();
    let mut in_header = true;

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_pair(trimmed) {
            Some(pair) => {
                in_header = false;
                values.push(pair);
            }
            None if in_header => name_lines.push(trimmed),
            None => warnings.push(ParseWarning {
                line: index + 1,
                content: line.to_string(),
            }),
        }
    }

    if values.is_empty() {
        return Err(FoilParseError::NoCoordinates);
    }

    let (first_x, first_y) = values[0];
    if first_x > 1.5 || first_y > 1.5 {
        // Lednicer layout: the first pair holds the surface point counts.
        let n_upper = (first_x as usize).min(values.len().saturating_sub(1));
        let mut upper: Vec<(f64, f64)> = values[1..n_upper + 1].to_vec();
        let lower: Vec<(f64, f64)> = values[n_upper + 1..].to_vec();
        upper.reverse();
        values = lower;
        values.extend(upper);
    }

    // Stray points outside the chord-normalized range (artifacts of some
    // generators) are dropped.
    values.retain(|(x, _)| *x > -0.001 && *x < 1.001);
    if values.is_empty() {
        return Err(FoilParseError::NoCoordinates);
    }

    let (xs, ys) = values.into_iter().unzip();
    Ok((
        AirfoilData {
            name: name_lines.join("\n"),
            xs,
            ys,
        },
        warnings,
    ))
}

/// Read and parse a `.dat` file.
pub fn load_dat(
    path: &Path,
) -> Result<(AirfoilData, Vec<ParseWarning>), FoilParseError> {
    let text = std::fs::read_to_string(path)?;
    let (mut foil, warnings) = parse_dat(&text)?;
    if foil.name.is_empty() {
        // Fall back to the file stem for nameless files.
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            foil.name = stem.to_string();
        }
    }
    Ok((foil, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SELIG: &str = "\
AG03 (selig layout)

1.00000  0.00000
0.50000  0.04000
0.00000  0.00000
0.50000 -0.02000
1.00000  0.00000
";

    #[test]
    fn selig_file_parses_in_order() {
        let (foil, warnings) = parse_dat(SELIG).unwrap();
        assert_eq!(foil.name, "AG03 (selig layout)");
        assert!(warnings.is_empty());
        assert_eq!(foil.len(), 5);
        assert_relative_eq!(foil.xs[0], 1.0);
        assert_relative_eq!(foil.ys[1], 0.04);
    }

    #[test]
    fn bad_lines_become_warnings_not_errors() {
        let text = "\
Some foil
0.0 0.0
garbage line
0.5 0.05
0.6 oops
1.0 0.0
";
        let (foil, warnings) = parse_dat(text).unwrap();
        assert_eq!(foil.len(), 3);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].line, 3);
        assert_eq!(warnings[0].content, "garbage line");
        assert_eq!(warnings[1].line, 5);
    }

    #[test]
    fn multi_line_header_joins_into_the_name() {
        let text = "\
NACA 2412
from the UIUC database
0.0 0.0
1.0 0.0
";
        let (foil, _) = parse_dat(text).unwrap();
        assert_eq!(foil.name, "NACA 2412\nfrom the UIUC database");
    }

    #[test]
    fn lednicer_layout_is_reordered_to_a_perimeter_walk() {
        // 3 upper points LE→TE, 3 lower points LE→TE.
        let text = "\
Example (lednicer layout)
3.0 3.0
0.0 0.00
0.5 0.05
1.0 0.00
0.0 0.00
0.5 -0.03
1.0 0.00
";
        let (foil, _) = parse_dat(text).unwrap();
        // Lower surface first, then the upper surface reversed.
        assert_eq!(foil.xs, vec![0.0, 0.5, 1.0, 1.0, 0.5, 0.0]);
        assert_eq!(foil.ys, vec![0.0, -0.03, 0.0, 0.0, 0.05, 0.0]);
    }

    #[test]
    fn out_of_range_samples_are_dropped() {
        let text = "\
clipped
-0.5 0.1
0.0 0.0
0.5 0.05
1.0 0.0
2.0 0.3
";
        let (foil, _) = parse_dat(text).unwrap();
        assert_eq!(foil.xs, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn file_without_coordinates_is_an_error() {
        assert!(matches!(
            parse_dat("just a name\nand a comment\n"),
            Err(FoilParseError::NoCoordinates)
        ));
        assert!(matches!(parse_dat(""), Err(FoilParseError::NoCoordinates)));
    }

    #[test]
    fn three_column_lines_are_not_coordinates() {
        let text = "\
foil
0.0 0.0 0.0
1.0 0.0
0.5 0.1
";
        let (foil, warnings) = parse_dat(text).unwrap();
        assert_eq!(foil.len(), 2);
        assert_eq!(warnings.len(), 0); // header line, not yet in data
        assert_eq!(foil.name, "foil\n0.0 0.0 0.0");
    }
}
