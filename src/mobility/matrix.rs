use ndarray::Array2;

use crate::ValidationError;

use super::MobilityRecord;

/// Build the dense tower-to-tower matrix from sparse records.
///
/// Entry `[i, j]` is the count for origin `i` and destination `j`. Every pair of
/// `[0, n_towers)²` without a record is 0, so files that omit zero-count rows
/// reconstruct correctly. Records may come in any order, but a pair may appear
/// only once, and both indices must be below `n_towers`.
pub fn reconstruct(records: &[MobilityRecord], n_towers: usize) -> Result<Array2<f64>, ValidationError> {
    let mut matrix = Array2::<f64>::zeros((n_towers, n_towers));
    let mut filled = Array2::<bool>::from_elem((n_towers, n_towers), false);

    for record in records {
        let &MobilityRecord { origin, destination, count } = record;
        if origin >= n_towers || destination >= n_towers {
            return Err(ValidationError::IndexOutOfRange { origin, destination, n_towers });
        }
        if std::mem::replace(&mut filled[[origin, destination]], true) {
            return Err(ValidationError::DuplicatePair { origin, destination });
        }
        matrix[[origin, destination]] = count as f64;
    }

    Ok(matrix)
}
