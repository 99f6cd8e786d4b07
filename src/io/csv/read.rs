//! CSV reading operations.

use std::{fs::File, path::Path};

use geo::Point;
use ndarray::Array2;
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};

use crate::geom::Tower;
use crate::mobility::RawRecord;
use crate::{Error, Result};

/// Reads a CSV file with a header row, keeping every column as a string.
fn read_string_table(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| Error::format(format!("[io::csv::read] failed to read {}: {e}", path.display())))
}

/// Get column `idx` as strings, with missing values read as empty strings.
fn string_column(df: &DataFrame, idx: usize, path: &Path) -> Result<Vec<String>> {
    let column = df.get_columns().get(idx)
        .ok_or_else(|| Error::format(format!("[io::csv::read] {} has {} columns, expected at least {}", path.display(), df.width(), idx + 1)))?;
    let values = column.str()
        .map_err(|e| Error::format(format!("[io::csv::read] column {idx} of {} is not text: {e}", path.display())))?;
    Ok(values.into_iter().map(|value| value.unwrap_or_default().to_string()).collect())
}

/// Reads the tower location file: a header row, then `name, longitude, latitude`
/// per tower. Row order is tower index order.
pub fn read_towers(path: &Path) -> Result<Vec<Tower>> {
    let df = read_string_table(path)?;
    let names = string_column(&df, 0, path)?;
    let lons = string_column(&df, 1, path)?;
    let lats = string_column(&df, 2, path)?;

    let parse = |row: usize, value: &str| value.trim().parse::<f64>()
        .map_err(|_| Error::format(format!("[io::csv::read] {}: row {row} has non-numeric coordinate {value:?}", path.display())));

    names.into_iter().zip(lons.iter().zip(&lats)).enumerate()
        .map(|(row, (name, (lon, lat)))| Ok(Tower { name, location: Point::new(parse(row, lon.as_str())?, parse(row, lat.as_str())?) }))
        .collect()
}

/// Reads a mobility file: a header row, then `date, origin, destination, count`.
/// Fields are returned unparsed so the ordering checks can report them verbatim.
pub fn read_mobility(path: &Path) -> Result<Vec<RawRecord>> {
    let df = read_string_table(path)?;
    let dates = string_column(&df, 0, path)?;
    let origins = string_column(&df, 1, path)?;
    let destinations = string_column(&df, 2, path)?;
    let counts = string_column(&df, 3, path)?;

    Ok(dates.into_iter()
        .zip(origins)
        .zip(destinations)
        .zip(counts)
        .map(|(((date, origin), destination), count)| RawRecord { date, origin, destination, count })
        .collect())
}

/// Reads a matrix written by [`write_matrix`](super::write_matrix): one row per
/// line, comma-separated, no header.
pub fn read_matrix(path: &Path) -> Result<Array2<f64>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file);

    let mut values = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| Error::format(format!("[io::csv::read] {}: {e}", path.display())))?;
        if row == 0 { n_cols = record.len() }
        for (col, field) in record.iter().enumerate() {
            let value = field.trim().parse::<f64>()
                .map_err(|_| Error::format(format!("[io::csv::read] {}: cell ({row}, {col}) is not a number: {field:?}", path.display())))?;
            values.push(value);
        }
        n_rows += 1;
    }

    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| Error::format(format!("[io::csv::read] {}: {e}", path.display())))
}
