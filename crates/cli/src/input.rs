//! CSV point ingestion.
//!
//! The first line is a header. Every other line is split on `,` and the two
//! configured columns are read as x and y. Rows that do not yield two finite
//! coordinates are skipped and counted.

use anyhow::{Context, Result};
use geoscan::{Point, Rect};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Padding added on every side of the point extent.
pub const BOUNDS_PADDING: f64 = 1.0;

/// Which columns hold the coordinates (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub x: usize,
    pub y: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self { x: 8, y: 9 }
    }
}

/// Points read from one input file.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub bounds: Rect,
    pub points: Vec<Point>,
    pub skipped: usize,
}

impl Dataset {
    fn from_points(points: Vec<Point>, skipped: usize) -> Self {
        Self {
            bounds: Rect::padded_bounds(&points, BOUNDS_PADDING),
            points,
            skipped,
        }
    }
}

/// Read points from the CSV file at `path`.
pub fn read_points(path: impl AsRef<Path>, columns: Columns) -> Result<Dataset> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open input {}", path.display()))?;
    parse_points(BufReader::new(file), columns)
        .with_context(|| format!("Failed to read input {}", path.display()))
}

/// Parse points from any buffered CSV source.
pub fn parse_points<R: BufRead>(reader: R, columns: Columns) -> Result<Dataset> {
    let mut lines = reader.lines();
    if lines.next().transpose()?.is_none() {
        return Ok(Dataset::from_points(Vec::new(), 0));
    }

    let mut points = Vec::new();
    let mut skipped = 0;
    for (row, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(&line, columns) {
            Some(point) => points.push(point),
            None => {
                skipped += 1;
                tracing::debug!("Skipping row {}: {:?}", row + 2, line);
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} rows without valid coordinates", skipped);
    }

    Ok(Dataset::from_points(points, skipped))
}

fn parse_row(line: &str, columns: Columns) -> Option<Point> {
    let fields: Vec<&str> = line.split(',').collect();
    let x = parse_coordinate(fields.get(columns.x)?)?;
    let y = parse_coordinate(fields.get(columns.y)?)?;
    Some(Point::new(x, y))
}

fn parse_coordinate(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const XY: Columns = Columns { x: 0, y: 1 };

    #[test]
    fn test_header_is_skipped() {
        let data = "x,y\n1.5,2.5\n3.0,4.0\n";
        let dataset = parse_points(Cursor::new(data), XY).unwrap();
        assert_eq!(
            dataset.points,
            vec![Point::new(1.5, 2.5), Point::new(3.0, 4.0)]
        );
        assert_eq!(dataset.skipped, 0);
    }

    #[test]
    fn test_bounds_are_padded() {
        let data = "x,y\n0.0,0.0\n2.0,1.0\n";
        let dataset = parse_points(Cursor::new(data), XY).unwrap();
        assert_eq!(dataset.bounds, Rect::new(-1.0, -1.0, 4.0, 3.0));
    }

    #[test]
    fn test_malformed_rows_are_counted() {
        let data = "x,y\n1.0,1.0\nabc,2.0\n3.0\n\n4.0,NaN\n5.0, 6.0 \n";
        let dataset = parse_points(Cursor::new(data), XY).unwrap();
        assert_eq!(
            dataset.points,
            vec![Point::new(1.0, 1.0), Point::new(5.0, 6.0)]
        );
        assert_eq!(dataset.skipped, 3);
    }

    #[test]
    fn test_default_columns() {
        let data = "a,b,c,d,e,f,g,h,lon,lat\n\
                    0,0,0,0,0,0,0,0,-73.98,40.75\n";
        let dataset = parse_points(Cursor::new(data), Columns::default()).unwrap();
        assert_eq!(dataset.points, vec![Point::new(-73.98, 40.75)]);
    }

    #[test]
    fn test_empty_input() {
        let dataset = parse_points(Cursor::new(""), XY).unwrap();
        assert!(dataset.points.is_empty());

        let dataset = parse_points(Cursor::new("x,y\n"), XY).unwrap();
        assert!(dataset.points.is_empty());
        assert_eq!(dataset.skipped, 0);
    }

    #[test]
    fn test_read_points_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,x,y").unwrap();
        writeln!(file, "1,10.0,20.0").unwrap();
        writeln!(file, "2,10.5,20.5").unwrap();
        file.flush().unwrap();

        let dataset = read_points(file.path(), Columns { x: 1, y: 2 }).unwrap();
        assert_eq!(dataset.points.len(), 2);
        assert_eq!(dataset.bounds, Rect::new(9.0, 19.0, 2.5, 2.5));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_points(dir.path().join("missing.csv"), XY).unwrap_err();
        assert!(err.to_string().contains("Failed to open input"));
    }
}
