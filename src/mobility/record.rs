use crate::ValidationError;

/// One row of a mobility file, exactly as read: date, origin tower name,
/// destination tower name, count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub date: String,
    pub origin: String,
    pub destination: String,
    pub count: String,
}

impl RawRecord {
    pub fn new(date: impl Into<String>, origin: impl Into<String>, destination: impl Into<String>, count: impl Into<String>) -> Self {
        Self { date: date.into(), origin: origin.into(), destination: destination.into(), count: count.into() }
    }
}

impl From<[&str; 4]> for RawRecord {
    fn from([date, origin, destination, count]: [&str; 4]) -> Self {
        Self::new(date, origin, destination, count)
    }
}

/// Number of people seen moving from one tower to another on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MobilityRecord {
    pub origin: usize,
    pub destination: usize,
    pub count: u64,
}

impl MobilityRecord {
    #[inline]
    pub fn new(origin: usize, destination: usize, count: u64) -> Self {
        Self { origin, destination, count }
    }
}

/// Decode a tower name of the form `prefix` followed by the tower index.
///
/// Returns `None` unless the name starts with `prefix` and the remainder is a
/// non-empty run of ASCII digits.
pub fn decode_tower_name(name: &str, prefix: &str) -> Option<usize> {
    name.strip_prefix(prefix).and_then(parse_digits)
}

/// Parse a non-empty run of ASCII digits. Signs and whitespace are rejected.
#[inline]
pub(crate) fn parse_digits<T: std::str::FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) { return None }
    s.parse().ok()
}

/// Decode one raw row, reporting the first malformed field.
pub(crate) fn decode_row(row: usize, raw: &RawRecord, prefix: &str) -> Result<MobilityRecord, ValidationError> {
    let origin = decode_tower_name(&raw.origin, prefix)
        .ok_or_else(|| ValidationError::MalformedOrigin { row, value: raw.origin.clone() })?;
    let destination = decode_tower_name(&raw.destination, prefix)
        .ok_or_else(|| ValidationError::MalformedDestination { row, value: raw.destination.clone() })?;
    let count = parse_digits::<u64>(&raw.count)
        .ok_or_else(|| ValidationError::MalformedCount { row, value: raw.count.clone() })?;
    Ok(MobilityRecord::new(origin, destination, count))
}

/// Decode every raw row into a record. Fails on the first malformed row; rows
/// are never skipped.
pub fn parse_records(rows: &[RawRecord], prefix: &str) -> Result<Vec<MobilityRecord>, ValidationError> {
    rows.iter().enumerate()
        .map(|(row, raw)| decode_row(row, raw, prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_prefixed_indices() {
        assert_eq!(decode_tower_name("br0", "br"), Some(0));
        assert_eq!(decode_tower_name("br1234", "br"), Some(1234));
        assert_eq!(decode_tower_name("br", "br"), None);
        assert_eq!(decode_tower_name("br0a", "br"), None);
        assert_eq!(decode_tower_name("bra0", "br"), None);
        assert_eq!(decode_tower_name("co0", "br"), None);
        assert_eq!(decode_tower_name("br-1", "br"), None);
        assert_eq!(decode_tower_name("br 1", "br"), None);
    }

    #[test]
    fn parses_rows() {
        let rows = [
            RawRecord::from(["20150201", "br0", "br1", "7"]),
            RawRecord::from(["20150201", "br2", "br0", "0"]),
        ];
        assert_eq!(
            parse_records(&rows, "br").unwrap(),
            vec![MobilityRecord::new(0, 1, 7), MobilityRecord::new(2, 0, 0)],
        );
    }

    #[test]
    fn reports_first_malformed_field() {
        let rows = [
            RawRecord::from(["20150201", "br0", "br1", "7"]),
            RawRecord::from(["20150201", "br1", "brx", "-3"]),
        ];
        assert_eq!(
            parse_records(&rows, "br"),
            Err(ValidationError::MalformedDestination { row: 1, value: "brx".into() }),
        );
    }
}
