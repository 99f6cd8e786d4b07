//! CSV writing operations.

use std::path::Path;

use ndarray::{ArrayBase, Data, Ix2};

use crate::io::PendingWrite;
use crate::{Error, Result};

/// Write a matrix as a comma-separated grid, one row per line, no header.
///
/// Values are printed in their shortest exact form, so [`read_matrix`](super::read_matrix)
/// recovers them bit for bit. The file only appears at `path` once fully written.
pub fn write_matrix<S: Data<Elem = f64>>(matrix: &ArrayBase<S, Ix2>, path: &Path) -> Result<()> {
    stage_matrix(matrix, path)?.finalize()
}

/// Write a matrix into a pending file for `path` without moving it into place.
pub(crate) fn stage_matrix<S: Data<Elem = f64>>(matrix: &ArrayBase<S, Ix2>, path: &Path) -> Result<PendingWrite> {
    let pending = PendingWrite::open(path)?;
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(pending);

    for row in matrix.rows() {
        writer.write_record(row.iter().map(|value| value.to_string()))
            .map_err(|e| Error::io(path, e.into()))?;
    }

    writer.flush().map_err(|e| Error::io(path, e))?;
    writer.into_inner()
        .map_err(|e| Error::io(path, std::io::Error::other(e.to_string())))
}
