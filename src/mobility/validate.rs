use crate::ValidationError;

use super::record::{decode_row, decode_tower_name, RawRecord};

/// Check that mobility rows are well formed and sorted origin-major.
///
/// Each row must have a prefixed numeric origin and destination and a
/// non-negative integer count. Origins may not decrease from one row to the
/// next; within a run of equal origins, destinations must strictly increase.
/// Rows with a zero count may be absent, so gaps are allowed.
pub fn validate_ordering(rows: &[RawRecord], prefix: &str) -> Result<(), ValidationError> {
    let mut prev_origin: Option<usize> = None;
    let mut prev_destination: Option<usize> = None;

    for (row, raw) in rows.iter().enumerate() {
        let record = decode_row(row, raw, prefix)?;

        if let Some(previous) = prev_origin {
            if record.origin < previous {
                return Err(ValidationError::OriginDecreased { row, origin: record.origin, previous });
            }
        }
        if prev_origin != Some(record.origin) {
            prev_origin = Some(record.origin);
            prev_destination = None;
        }

        if let Some(previous) = prev_destination {
            if record.destination <= previous {
                return Err(ValidationError::DestinationNotIncreasing {
                    row,
                    origin: record.origin,
                    destination: record.destination,
                    previous,
                });
            }
        }
        prev_destination = Some(record.destination);
    }

    Ok(())
}

/// Check that mobility rows list every (origin, destination) pair exactly once,
/// in origin-major order, with no gaps.
///
/// The tower count is taken from the last row's origin. This is a diagnostic;
/// reconstruction does not require a full file.
pub fn validate_full(rows: &[RawRecord], prefix: &str) -> Result<(), ValidationError> {
    let last = rows.last().ok_or(ValidationError::Empty)?;
    let n_towers = decode_tower_name(&last.origin, prefix)
        .ok_or_else(|| ValidationError::MalformedOrigin { row: rows.len() - 1, value: last.origin.clone() })?
        + 1;

    // A grid that cannot be counted cannot match the rows either.
    let expected = n_towers.checked_mul(n_towers)
        .ok_or(ValidationError::RowCount { n_towers, expected: usize::MAX, found: rows.len() })?;
    let mut row = 0;
    for origin in 0..n_towers {
        for destination in 0..n_towers {
            let raw = rows.get(row)
                .ok_or(ValidationError::RowCount { n_towers, expected, found: rows.len() })?;
            if raw.origin != format!("{prefix}{origin}") || raw.destination != format!("{prefix}{destination}") {
                return Err(ValidationError::UnexpectedRow {
                    row,
                    found: format!("{},{},{},{}", raw.date, raw.origin, raw.destination, raw.count),
                    origin,
                    destination,
                });
            }
            row += 1;
        }
    }

    if rows.len() != expected {
        return Err(ValidationError::RowCount { n_towers, expected, found: rows.len() });
    }
    Ok(())
}

/// Check that tower `i` is named `prefix` followed by `i`, for every row of the
/// tower file.
pub fn validate_tower_names<S: AsRef<str>>(names: &[S], prefix: &str) -> Result<(), ValidationError> {
    for (row, name) in names.iter().map(|name| name.as_ref()).enumerate() {
        let expected = format!("{prefix}{row}");
        if name != expected {
            return Err(ValidationError::TowerNameMismatch { row, name: name.to_string(), expected });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: &str = "20150201";

    fn rows(cells: &[(&str, &str, &str)]) -> Vec<RawRecord> {
        cells.iter()
            .map(|&(origin, destination, count)| RawRecord::new(DAY, origin, destination, count))
            .collect()
    }

    #[test]
    fn full_rows_are_ordered() {
        let csv = rows(&[("br0", "br0", "13853"), ("br0", "br1", "13853"), ("br0", "br2", "13853")]);
        assert_eq!(validate_ordering(&csv, "br"), Ok(()));
    }

    #[test]
    fn missing_rows_are_ordered() {
        let csv = rows(&[("br0", "br0", "13853"), ("br0", "br2", "13853"), ("br1", "br3", "13853")]);
        assert_eq!(validate_ordering(&csv, "br"), Ok(()));
        assert_eq!(validate_ordering(&[], "br"), Ok(()));
    }

    #[test]
    fn malformed_origin() {
        for bad in ["br0a", "bra0"] {
            let csv = rows(&[("br0", "br0", "13853"), (bad, "br2", "13853"), ("br1", "br3", "13853")]);
            assert_eq!(
                validate_ordering(&csv, "br"),
                Err(ValidationError::MalformedOrigin { row: 1, value: bad.into() }),
            );
        }
    }

    #[test]
    fn malformed_destination() {
        for bad in ["br2a", "bra2"] {
            let csv = rows(&[("br0", "br0", "13853"), ("br0", bad, "13853"), ("br1", "br3", "13853")]);
            assert_eq!(
                validate_ordering(&csv, "br"),
                Err(ValidationError::MalformedDestination { row: 1, value: bad.into() }),
            );
        }
    }

    #[test]
    fn malformed_or_negative_count() {
        for bad in ["a13853", "138a53", "13853a", "-13853", ""] {
            let csv = rows(&[("br0", "br0", "13853"), ("br0", "br2", bad), ("br1", "br3", "13853")]);
            assert_eq!(
                validate_ordering(&csv, "br"),
                Err(ValidationError::MalformedCount { row: 1, value: bad.into() }),
            );
        }
    }

    #[test]
    fn destination_goes_backwards() {
        let csv = rows(&[("br0", "br0", "13853"), ("br0", "br4", "13853"), ("br0", "br3", "13853")]);
        assert_eq!(
            validate_ordering(&csv, "br"),
            Err(ValidationError::DestinationNotIncreasing { row: 2, origin: 0, destination: 3, previous: 4 }),
        );
    }

    #[test]
    fn origin_goes_backwards() {
        let csv = rows(&[("br0", "br0", "13853"), ("br2", "br2", "13853"), ("br1", "br3", "13853")]);
        assert_eq!(
            validate_ordering(&csv, "br"),
            Err(ValidationError::OriginDecreased { row: 2, origin: 1, previous: 2 }),
        );
    }

    #[test]
    fn repeated_pair() {
        let csv = rows(&[("br0", "br0", "13853"), ("br0", "br0", "13853"), ("br1", "br3", "13853")]);
        assert!(matches!(
            validate_ordering(&csv, "br"),
            Err(ValidationError::DestinationNotIncreasing { row: 1, .. }),
        ));
    }

    #[test]
    fn destination_resets_on_new_origin() {
        let csv = rows(&[("br0", "br5", "1"), ("br1", "br0", "1"), ("br3", "br0", "1")]);
        assert_eq!(validate_ordering(&csv, "br"), Ok(()));
    }

    #[test]
    fn full_file_is_full() {
        let csv = rows(&[("br0", "br0", "1"), ("br0", "br1", "0"), ("br1", "br0", "2"), ("br1", "br1", "3")]);
        assert_eq!(validate_full(&csv, "br"), Ok(()));
    }

    #[test]
    fn full_check_rejects_missing_row() {
        let csv = rows(&[("br0", "br0", "13853"), ("br0", "br2", "13853"), ("br1", "br3", "13853")]);
        assert!(matches!(
            validate_full(&csv, "br"),
            Err(ValidationError::UnexpectedRow { row: 1, origin: 0, destination: 1, .. }),
        ));

        let short = rows(&[("br0", "br0", "1"), ("br0", "br1", "1"), ("br1", "br0", "1")]);
        assert_eq!(
            validate_full(&short, "br"),
            Err(ValidationError::RowCount { n_towers: 2, expected: 4, found: 3 }),
        );
    }

    #[test]
    fn full_check_survives_huge_tower_index() {
        let csv = rows(&[("br0", "br0", "1"), ("br4294967296", "br0", "1")]);
        assert!(validate_full(&csv, "br").is_err());

        let huge = format!("br{}", usize::MAX / 2);
        let csv = rows(&[("br0", "br0", "1"), (huge.as_str(), "br0", "1")]);
        assert_eq!(
            validate_full(&csv, "br"),
            Err(ValidationError::RowCount { n_towers: usize::MAX / 2 + 1, expected: usize::MAX, found: 2 }),
        );
        assert_eq!(validate_full(&[], "br"), Err(ValidationError::Empty));
    }

    #[test]
    fn tower_names_follow_row_index() {
        assert_eq!(validate_tower_names(&["br0", "br1", "br2"], "br"), Ok(()));
        assert_eq!(
            validate_tower_names(&["br0", "br2"], "br"),
            Err(ValidationError::TowerNameMismatch { row: 1, name: "br2".into(), expected: "br1".into() }),
        );
        assert!(validate_tower_names(&["br00"], "br").is_err());
    }
}
