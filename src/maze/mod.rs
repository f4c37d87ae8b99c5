//! Map loading and parsing module.
//!
//! This module reads the text map format into a typed [`GridMap`].
//!
//! # File format
//!
//! The first line declares the size as `WIDTHxHEIGHT` (the separator may be
//! `x` or `X`), followed by exactly `HEIGHT` rows of exactly `WIDTH`
//! characters each. See [`CellType::from_char`] for the character classes.
//!
//! ```text
//! 5x3
//! ooooo
//! o@ To
//! ooooo
//! ```

pub mod grid;

pub use grid::{Cell, CellType, GridMap};

use crate::error::MapError;
use std::path::Path;

/// Parses map text into a [`GridMap`].
///
/// Trailing carriage returns are ignored, so files with Windows line endings
/// parse the same as Unix ones.
///
/// # Errors
/// Any structural problem is returned as a [`MapError`] and logged.
pub fn parse_map(text: &str) -> Result<GridMap, MapError> {
    let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));

    let header = lines.next().ok_or_else(|| {
        log::error!("Map file is empty");
        MapError::Empty
    })?;
    let (width, height) = parse_dimensions(header).ok_or_else(|| {
        log::error!("Invalid map dimensions line: {:?}", header);
        MapError::InvalidDimensions(header.to_string())
    })?;

    let rows: Vec<&str> = lines.collect();
    if rows.len() != height {
        log::error!(
            "Number of rows in map ({}) does not match expected height ({})",
            rows.len(),
            height
        );
        return Err(MapError::RowCountMismatch {
            expected: height,
            actual: rows.len(),
        });
    }

    let mut grid = Vec::with_capacity(height);
    for (row, line) in rows.into_iter().enumerate() {
        let cells: Vec<CellType> = line.chars().map(CellType::from_char).collect();
        if cells.len() != width {
            log::error!(
                "Row {} length ({}) does not match expected width ({})",
                row,
                cells.len(),
                width
            );
            return Err(MapError::RowLengthMismatch {
                row,
                expected: width,
                actual: cells.len(),
            });
        }
        grid.push(cells);
    }

    let map = GridMap::new(grid).inspect_err(|e| log::error!("{}", e))?;
    log::info!(
        "Map successfully parsed: {}x{} cells, start at {:?}",
        map.columns(),
        map.rows(),
        map.player_start()
    );
    Ok(map)
}

/// Reads and parses a map file.
pub fn load_map_file(path: &Path) -> Result<GridMap, MapError> {
    log::info!("Loading map from {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&text)
}

fn parse_dimensions(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.trim().split(['x', 'X']);
    let width = parts.next()?.trim().parse().ok()?;
    let height = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests parsing a small map with CRLF line endings.
    #[test]
    fn test_parse_map_crlf() {
        let map = parse_map("4X3\r\noooo\r\no@To\r\noSoo\r\n").unwrap();
        assert_eq!(map.columns(), 4);
        assert_eq!(map.rows(), 3);
        assert_eq!(map.player_start(), Cell::new(1, 1));
        assert_eq!(map.cell(1, 2), Some(CellType::Collectable));
        assert_eq!(map.cell(2, 1), Some(CellType::Car));
    }

    /// Tests the rejected header forms.
    #[test]
    fn test_invalid_dimensions() {
        for header in ["", "3", "3x", "ax3", "3x3x3", "3*3"] {
            let text = format!("{}\n@", header);
            assert!(
                matches!(parse_map(&text), Err(MapError::InvalidDimensions(_))),
                "header {:?} should be rejected",
                header
            );
        }
    }

    /// Tests that an empty file is reported as such.
    #[test]
    fn test_empty_map() {
        assert!(matches!(parse_map(""), Err(MapError::Empty)));
    }

    /// Tests row count and row width mismatches.
    #[test]
    fn test_size_mismatch() {
        assert!(matches!(
            parse_map("2x2\n@ \n"),
            Err(MapError::RowCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            parse_map("2x2\n@ \n   \n"),
            Err(MapError::RowLengthMismatch {
                row: 1,
                expected: 2,
                actual: 3
            })
        ));
    }

    /// Tests that a map with two starts is rejected.
    #[test]
    fn test_two_player_starts() {
        assert!(matches!(
            parse_map("2x1\n@@"),
            Err(MapError::PlayerStartCount(2))
        ));
    }

    /// Tests that a missing file is an I/O error carrying the path.
    #[test]
    fn test_load_missing_file() {
        let path = Path::new("definitely/not/a/map.txt");
        match load_map_file(path) {
            Err(MapError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Tests that the bundled sample map loads.
    #[test]
    fn test_bundled_map() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/maps/maze.txt");
        let map = load_map_file(&path).unwrap();
        assert_eq!((map.columns(), map.rows()), (12, 10));
        assert_eq!(map.player_start(), Cell::new(1, 1));
        assert_eq!(map.cells_of(CellType::Collectable).count(), 3);
        assert_eq!(map.cells_of(CellType::Car).count(), 1);
    }
}
