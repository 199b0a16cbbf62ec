//! Map-file loader.
//!
//! # Format
//!
//! One line per grid row, integer codes separated by `", "`:
//!
//! ```text
//! 0, 0, 0, 0, 0
//! 0, 12, 40, 200, 0
//! 0, 5, 0, 300, 0
//! 0, 0, 0, 0, 0
//! ```
//!
//! See [`CellKind::decode`](crate::CellKind::decode) for the code table.
//! Every row must have the same number of fields.  Blank lines are skipped.
//! Any malformed input is an error; there is no partial map.

use std::io::Read;
use std::path::Path;

use tracing::info;

use sp_core::CellExtent;

use crate::{GridBuilder, GridError, GridResult, ParkingGraph};

/// Read a map file into a matrix of codes.
pub fn load_map_csv(path: &Path) -> GridResult<Vec<Vec<i32>>> {
    let file = std::fs::File::open(path).map_err(GridError::Io)?;
    let codes = load_map_reader(file)?;
    info!(path = %path.display(), rows = codes.len(), "loaded map");
    Ok(codes)
}

/// Like [`load_map_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding maps with
/// `include_str!`.
pub fn load_map_reader<R: Read>(reader: R) -> GridResult<Vec<Vec<i32>>> {
    // Flexible so a short row is reported as `Ragged` with its line number
    // instead of a generic CSV error.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<i32>> = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() == 1 && record[0].is_empty() {
            continue;
        }

        let row = record
            .iter()
            .map(|field| {
                field.parse::<i32>().map_err(|_| GridError::Parse {
                    line,
                    message: format!("invalid cell code {field:?}"),
                })
            })
            .collect::<GridResult<Vec<i32>>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(GridError::Ragged { line, expected: first.len(), got: row.len() });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(GridError::EmptyMap);
    }
    Ok(rows)
}

/// Load a map file and build its graph, sizing cells so the grid fills a
/// `panel_width × panel_height` pixel panel.
pub fn load_graph(path: &Path, panel_width: u32, panel_height: u32) -> GridResult<ParkingGraph> {
    let codes = load_map_csv(path)?;
    let cols = codes[0].len();
    let extent = CellExtent::fit(panel_width, panel_height, codes.len(), cols).ok_or_else(|| {
        GridError::Parse {
            line:    0,
            message: format!(
                "{}x{} grid does not fit a {panel_width}x{panel_height} px panel",
                codes.len(),
                cols
            ),
        }
    })?;
    GridBuilder::from_codes(&codes, extent)
}

fn csv_error(e: csv::Error) -> GridError {
    let line = e.position().map_or(0, |p| p.line());
    match e.into_kind() {
        csv::ErrorKind::Io(io) => GridError::Io(io),
        other => GridError::Parse { line, message: format!("{other:?}") },
    }
}
