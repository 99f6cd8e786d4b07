//! Tower-level mobility records: decoding, ordering checks, and the dense
//! tower-to-tower matrix.

mod matrix;
mod record;
mod validate;

pub use matrix::reconstruct;
pub use record::{decode_tower_name, parse_records, MobilityRecord, RawRecord};
pub use validate::{validate_full, validate_ordering, validate_tower_names};
